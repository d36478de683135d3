//! Small pieces of world state that share the save format with genetics.

use serde::{Deserialize, Serialize};

use crate::codec::{ensure_within, BinBuffer, CodecError, Decode, Encode};
use crate::random::Randomizer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherKind {
    #[default]
    Sunny,
    Overcast,
    Drizzle,
    Rain,
    Thunderstorm,
}

impl WeatherKind {
    pub const ALL: [WeatherKind; 5] = [
        WeatherKind::Sunny,
        WeatherKind::Overcast,
        WeatherKind::Drizzle,
        WeatherKind::Rain,
        WeatherKind::Thunderstorm,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Chance of moving to each kind (indexed by id) once a state runs out.
    fn transitions(self) -> [f64; 5] {
        match self {
            WeatherKind::Sunny => [0.5, 0.3, 0.2, 0.0, 0.0],
            WeatherKind::Overcast => [0.3, 0.3, 0.2, 0.1, 0.1],
            WeatherKind::Drizzle => [0.4, 0.3, 0.3, 0.0, 0.0],
            WeatherKind::Rain => [0.4, 0.4, 0.0, 0.2, 0.0],
            WeatherKind::Thunderstorm => [0.7, 0.2, 0.0, 0.0, 0.1],
        }
    }
}

/// Current weather, the one before it, and how long the current one has lasted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherState {
    pub last: WeatherKind,
    pub current: WeatherKind,
    pub time: u16,
}

impl WeatherState {
    /// Ticks a weather state lasts before transitioning.
    pub const STATE_TIME: u16 = 700;

    /// Roll the next weather from the transition table. Returns whether the
    /// weather changed; `last` only moves when it did.
    pub fn transition(&mut self, random: &mut Randomizer) -> bool {
        let previous = self.current;
        let roll = random.next_float();
        let mut chance_sum = 0.0;

        for (next, chance) in previous.transitions().into_iter().enumerate() {
            chance_sum += chance;
            if roll < chance_sum {
                self.current = WeatherKind::ALL[next];
                break;
            }
        }

        if self.current != previous {
            self.last = previous;
            return true;
        }
        false
    }

    /// Advance one tick, transitioning when the state has run its course.
    /// Returns whether the weather changed.
    pub fn tick(&mut self, random: &mut Randomizer) -> bool {
        self.time = self.time.saturating_add(1);
        // A loaded state may already sit at STATE_TIME, so compare with >=.
        if self.time >= Self::STATE_TIME {
            self.time = 0;
            return self.transition(random);
        }
        false
    }
}

impl Encode for WeatherState {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_u8(self.last.id());
        buffer.write_u8(self.current.id());
        buffer.write_u16(self.time);
    }
}

impl Decode for WeatherState {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        let last = buffer.read_u8()?;
        let current = buffer.read_u8()?;
        let time = buffer.read_u16()?;

        let max_id = f64::from(WeatherKind::Thunderstorm.id());
        ensure_within("weather.last", f64::from(last), 0.0, max_id)?;
        ensure_within("weather.current", f64::from(current), 0.0, max_id)?;
        ensure_within("weather.time", f64::from(time), 0.0, f64::from(Self::STATE_TIME))?;

        Ok(Self {
            last: WeatherKind::from_id(last).unwrap_or_default(),
            current: WeatherKind::from_id(current).unwrap_or_default(),
            time,
        })
    }
}

/// Where something sits along a river path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPosition {
    /// Lateral offset, -1 and 1 being the banks; values past 1 are on land.
    pub radius: f32,
    /// Distance travelled along the path, 0 to 1.
    pub progress: f32,
}

impl PathPosition {
    pub const RADIUS_MIN: f32 = -1.0;
    pub const RADIUS_MAX: f32 = 2.0;
}

impl Encode for PathPosition {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_f32(self.radius);
        buffer.write_f32(self.progress);
    }
}

impl Decode for PathPosition {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        let radius = buffer.read_f32()?;
        let progress = buffer.read_f32()?;

        ensure_within(
            "path.radius",
            f64::from(radius),
            f64::from(Self::RADIUS_MIN),
            f64::from(Self::RADIUS_MAX),
        )?;
        ensure_within("path.progress", f64::from(progress), 0.0, 1.0)?;

        Ok(Self { radius, progress })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_bytes(radius: f32, progress: f32) -> BinBuffer {
        let mut buffer = BinBuffer::new();
        buffer.write_f32(radius);
        buffer.write_f32(progress);
        buffer
    }

    #[test]
    fn test_path_radius_bounds() {
        assert!(PathPosition::decode(&mut path_bytes(2.0, 0.5)).is_ok());
        assert!(PathPosition::decode(&mut path_bytes(-1.0, 0.0)).is_ok());
        assert!(matches!(
            PathPosition::decode(&mut path_bytes(2.5, 0.5)),
            Err(CodecError::OutOfRange { field: "path.radius", .. })
        ));
        assert!(PathPosition::decode(&mut path_bytes(0.0, 1.5)).is_err());
        assert!(PathPosition::decode(&mut path_bytes(f32::NAN, 0.5)).is_err());
    }

    #[test]
    fn test_weather_decode_bounds() {
        let state = WeatherState {
            last: WeatherKind::Rain,
            current: WeatherKind::Thunderstorm,
            time: WeatherState::STATE_TIME,
        };
        let bytes = state.to_buffer().into_bytes();
        assert_eq!(WeatherState::decode(&mut BinBuffer::from_bytes(bytes)).unwrap(), state);

        let mut bad_id = BinBuffer::from_bytes(vec![5, 0, 0, 0]);
        assert!(WeatherState::decode(&mut bad_id).is_err());

        let mut bad_time = BinBuffer::new();
        bad_time.write_u8(0);
        bad_time.write_u8(0);
        bad_time.write_u16(701);
        assert!(WeatherState::decode(&mut bad_time).is_err());
    }

    #[test]
    fn test_transition_resets_time() {
        let mut state = WeatherState {
            time: 699,
            ..WeatherState::default()
        };
        let mut random = Randomizer::new(5);
        let changed = state.tick(&mut random);
        assert_eq!(state.time, 0);
        assert_eq!(changed, state.current != WeatherKind::Sunny);
        // Sunny never jumps straight to rain or thunder.
        assert!(matches!(
            state.current,
            WeatherKind::Sunny | WeatherKind::Overcast | WeatherKind::Drizzle
        ));
    }

    #[test]
    fn test_unchanged_roll_keeps_last() {
        let mut state = WeatherState {
            last: WeatherKind::Rain,
            current: WeatherKind::Sunny,
            time: 0,
        };
        // The first draw from seed 0 is far below Sunny's 0.5 chance to stay.
        assert!(!state.transition(&mut Randomizer::new(0)));
        assert_eq!(state.current, WeatherKind::Sunny);
        assert_eq!(state.last, WeatherKind::Rain);
    }

    #[test]
    fn test_changed_roll_moves_last() {
        let mut state = WeatherState {
            last: WeatherKind::Rain,
            current: WeatherKind::Sunny,
            time: 0,
        };
        let mut random = Randomizer::new(0);
        let mut changed = false;
        for _ in 0..64 {
            if state.transition(&mut random) {
                changed = true;
                break;
            }
        }
        assert!(changed);
        assert_ne!(state.current, WeatherKind::Sunny);
        assert_eq!(state.last, WeatherKind::Sunny);
    }

    #[test]
    fn test_tick_only_rolls_when_time_runs_out() {
        let mut state = WeatherState::default();
        let mut random = Randomizer::new(77);
        let untouched = random;
        assert!(!state.tick(&mut random));
        assert_eq!(state.time, 1);
        assert_eq!(random, untouched);

        // A loaded state at the limit still rolls on the next tick.
        state.time = WeatherState::STATE_TIME;
        state.tick(&mut random);
        assert_eq!(state.time, 0);
        assert_ne!(random, untouched);
    }
}
