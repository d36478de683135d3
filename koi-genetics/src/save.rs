//! Save snapshots.
//!
//! A snapshot is the binary encoding of the pond's heritable state, stored on
//! disk as base64 text. Any field that fails validation fails the whole load.

use anyhow::Context;
use koi_core::codec::ensure_within;
use koi_core::{BinBuffer, CodecError, Decode, Encode, Randomizer, WeatherState};
use std::fs;
use std::path::Path;

use crate::fish::Fish;

/// Bumped whenever the snapshot layout changes.
pub const SNAPSHOT_VERSION: u8 = 1;

/// File extension recommended for saved snapshots.
pub const SNAPSHOT_FILE_EXT: &str = "koi.sav";

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub random: Randomizer,
    pub weather: WeatherState,
    pub fish: Vec<Fish>,
}

impl Snapshot {
    /// The fish count is stored as a u16.
    pub const MAX_FISH: usize = u16::MAX as usize;

    pub fn new(random: Randomizer, weather: WeatherState, fish: Vec<Fish>) -> Result<Self, CodecError> {
        ensure_fish_count(fish.len())?;
        Ok(Self {
            random,
            weather,
            fish,
        })
    }

    pub fn to_text(&self) -> String {
        self.to_buffer().to_text()
    }

    pub fn from_text(text: &str) -> Result<Self, CodecError> {
        Self::decode(&mut BinBuffer::from_text(text)?)
    }
}

impl Encode for Snapshot {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_u8(SNAPSHOT_VERSION);
        self.random.encode(buffer);
        self.weather.encode(buffer);
        debug_assert!(self.fish.len() <= Self::MAX_FISH, "snapshot holds too many fish");
        buffer.write_u16(self.fish.len() as u16);
        for fish in &self.fish {
            fish.encode(buffer);
        }
    }
}

impl Decode for Snapshot {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        let version = buffer.read_u8()?;
        ensure_within(
            "snapshot.version",
            f64::from(version),
            f64::from(SNAPSHOT_VERSION),
            f64::from(SNAPSHOT_VERSION),
        )?;

        let random = Randomizer::decode(buffer)?;
        let weather = WeatherState::decode(buffer)?;
        let count = buffer.read_u16()?;
        let fish = (0..count)
            .map(|_| Fish::decode(buffer))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            random,
            weather,
            fish,
        })
    }
}

fn ensure_fish_count(count: usize) -> Result<(), CodecError> {
    if count > Snapshot::MAX_FISH {
        tracing::error!(count, max = Snapshot::MAX_FISH, "snapshot fish count out of range");
        return Err(CodecError::OutOfRange {
            field: "snapshot.fish",
            value: count as f64,
        });
    }
    Ok(())
}

/// Write a snapshot as base64 text. Fails before touching the file when the
/// snapshot cannot be encoded losslessly.
pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &Snapshot) -> anyhow::Result<()> {
    let path = path.as_ref();
    ensure_fish_count(snapshot.fish.len())
        .with_context(|| format!("encode snapshot: {}", path.display()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    fs::write(path, snapshot.to_text())
        .with_context(|| format!("write snapshot file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), fish = snapshot.fish.len(), "snapshot saved");
    Ok(())
}

pub fn load_snapshot(path: impl AsRef<Path>) -> anyhow::Result<Snapshot> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("read snapshot file: {}", path.display()))?;
    let snapshot = Snapshot::from_text(text.trim())
        .with_context(|| format!("decode snapshot file: {}", path.display()))?;
    Ok(snapshot)
}
