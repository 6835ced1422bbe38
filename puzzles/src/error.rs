use thiserror::Error;

/// Errors from constructing a concrete puzzle. Distinct from `puzzle`'s
/// solver-level `SolverError`: these happen before any solver ever sees the
/// puzzle. Hanoi/Lights Out out-of-range sizes are *not* represented here —
/// those fall back to documented defaults with a logged warning rather than
/// failing construction.
#[derive(Debug, Error)]
pub enum PuzzleConfigError {
    #[error("could not read maze file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed maze file {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("maze file {path} defines no player")]
    NoPlayer { path: String },

    #[error("maze file {path} defines more than one player")]
    MultiplePlayers { path: String },

    #[error("maze file {path} defines more than 4 NPCs")]
    TooManyNpcs { path: String },

    #[error("unknown puzzle {0:?}; expected one of hanoi, lightsout, ternary, mmz")]
    UnknownKind(String),
}
