use thiserror::Error;

/// Errors surfaced by the engine to game code.
///
/// Games return these from `Game::init`; the runner forwards them to the
/// host, which ends the session.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown asset `{0}`")]
    UnknownAsset(String),

    #[error("asset `{0}` is already registered")]
    DuplicateAsset(String),

    #[error("invalid asset manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("invalid color `{0}`, expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid body geometry: {0}")]
    InvalidGeometry(String),

    #[error("no tilemap has been created")]
    NoTilemap,

    #[error("tile ({x}, {y}) is outside the {width}x{height} tilemap")]
    TileOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}
