//! Process-wide defaults, overridable from the environment
//!
//! Two knobs are read once, on first use:
//!
//! - `QUADGLYPH_MAX_TEXTURE_DIM` - largest texture side in texels (default 8192)
//! - `QUADGLYPH_STREAM_POLICY` - `clear` (default) or `clamp`
//!
//! ```bash
//! QUADGLYPH_MAX_TEXTURE_DIM=16384 QUADGLYPH_STREAM_POLICY=clamp ./my_app
//! ```
//!
//! Runtime setters override whatever the environment said.

use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::OnceLock;

/// Side length every WebGL2-class device supports comfortably
pub const DEFAULT_MAX_TEXTURE_DIM: u32 = 8192;

/// How the layout stream keeps stale texels from showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Zero the previous footprint, then write the new content
    #[default]
    ClearPrevious,
    /// Upload a region as large as the largest footprint seen so far
    ClampNoShrink,
}

impl WritePolicy {
    fn to_u8(self) -> u8 {
        match self {
            WritePolicy::ClearPrevious => 0,
            WritePolicy::ClampNoShrink => 1,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            1 => WritePolicy::ClampNoShrink,
            _ => WritePolicy::ClearPrevious,
        }
    }
}

impl std::str::FromStr for WritePolicy {
    type Err = crate::error::QuadglyphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clear" | "clear-previous" => Ok(WritePolicy::ClearPrevious),
            "clamp" | "clamp-no-shrink" => Ok(WritePolicy::ClampNoShrink),
            other => Err(crate::error::QuadglyphError::ConfigError(format!(
                "unknown stream policy '{}', expected 'clear' or 'clamp'",
                other
            ))),
        }
    }
}

static MAX_TEXTURE_DIM: AtomicU32 = AtomicU32::new(DEFAULT_MAX_TEXTURE_DIM);
static STREAM_POLICY: AtomicU8 = AtomicU8::new(0);
static ENV_CHECKED: OnceLock<()> = OnceLock::new();

fn check_env() {
    ENV_CHECKED.get_or_init(|| {
        if let Ok(val) = std::env::var("QUADGLYPH_MAX_TEXTURE_DIM") {
            match val.trim().parse::<u32>() {
                Ok(dim) if dim > 0 => {
                    MAX_TEXTURE_DIM.store(dim, Ordering::SeqCst);
                    log::info!("Max texture dimension {} via QUADGLYPH_MAX_TEXTURE_DIM", dim);
                },
                _ => log::warn!("Ignoring QUADGLYPH_MAX_TEXTURE_DIM={:?}", val),
            }
        }
        if let Ok(val) = std::env::var("QUADGLYPH_STREAM_POLICY") {
            match val.parse::<WritePolicy>() {
                Ok(policy) => {
                    STREAM_POLICY.store(policy.to_u8(), Ordering::SeqCst);
                    log::info!("Stream policy {:?} via QUADGLYPH_STREAM_POLICY", policy);
                },
                Err(e) => log::warn!("{}", e),
            }
        }
    });
}

/// Default largest texture side in texels
pub fn max_texture_dimension() -> u32 {
    check_env();
    MAX_TEXTURE_DIM.load(Ordering::SeqCst)
}

pub fn set_max_texture_dimension(dim: u32) {
    check_env();
    MAX_TEXTURE_DIM.store(dim.max(1), Ordering::SeqCst);
}

/// Default write policy for new layout streams
pub fn stream_policy() -> WritePolicy {
    check_env();
    WritePolicy::from_u8(STREAM_POLICY.load(Ordering::SeqCst))
}

pub fn set_stream_policy(policy: WritePolicy) {
    check_env();
    STREAM_POLICY.store(policy.to_u8(), Ordering::SeqCst);
}
