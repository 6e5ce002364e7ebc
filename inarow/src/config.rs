use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::InvalidConfig;

/// Everything that is fixed for the lifetime of a game instance.
///
/// The defaults are the classic pixel layout: a 20 x 15 board of 40 pixel
/// cells, five in a row to win, and a three second pause before a finished
/// game starts over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board columns.
    pub width: usize,
    /// Board rows.
    pub height: usize,
    /// How many marks in a row win the game.
    pub win_length: usize,
    #[serde(rename = "auto_reset_delay_secs", with = "duration_secs")]
    pub auto_reset_delay: Duration,
    pub layout: Layout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            win_length: 5,
            auto_reset_delay: Duration::from_secs(3),
            layout: Layout::default(),
        }
    }
}

impl GameConfig {
    /// The default game, laid out for a terminal where the pointer reports character cells.
    pub fn terminal() -> Self {
        Self {
            layout: Layout::terminal(),
            ..Self::default()
        }
    }

    /// Reads a JSON config file. Fields missing from the file keep their default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Self::load_over(path, &Self::default())
    }

    /// Reads a JSON config file on top of `base`: every field the file
    /// leaves out, including individual layout fields, is taken from `base`.
    pub fn load_over(path: &Path, base: &GameConfig) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open config file '{}'", path.display()))?;
        let overrides: serde_json::Value = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Config file '{}' is not valid JSON", path.display()))?;
        let config = Self::merged(base, overrides)
            .with_context(|| format!("Invalid config file '{}'", path.display()))?;
        Ok(config)
    }

    /// Applies the fields present in `overrides` to `base` and validates the result.
    pub fn merged(base: &GameConfig, overrides: serde_json::Value) -> anyhow::Result<Self> {
        let mut value = serde_json::to_value(base)?;
        merge_json(&mut value, overrides);
        let config: GameConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the basic bounds: every size must be positive, and the board
    /// must have an addressable number of cells.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.width == 0 {
            return Err(InvalidConfig::ZeroWidth);
        }
        if self.height == 0 {
            return Err(InvalidConfig::ZeroHeight);
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(InvalidConfig::BoardTooLarge);
        }
        if self.win_length == 0 {
            return Err(InvalidConfig::ZeroWinLength);
        }
        if self.layout.cell_width == 0 || self.layout.cell_height == 0 {
            return Err(InvalidConfig::ZeroCellSize);
        }
        Ok(())
    }

    /// The smallest `(width, height)` area, in pointer units measured from
    /// the origin, that holds both the board and the menu.
    pub fn required_area(&self) -> (u32, u32) {
        let layout = &self.layout;
        let (board_right, board_bottom) = layout.cell_origin(self.height, self.width);
        let (last_x, last_y) = layout.menu_item_origin(crate::MenuAction::ALL.len() - 1);
        let menu_right = i64::from(last_x) + i64::from(layout.menu_item_width);
        let menu_bottom = i64::from(last_y) + i64::from(layout.menu_item_height);
        let clamp = |v: i64| u32::try_from(v.max(0)).unwrap_or(u32::MAX);
        (
            clamp(board_right.max(menu_right)),
            clamp(board_bottom.max(menu_bottom)),
        )
    }
}

/// Where things are in the pointer's coordinate system.
///
/// Board cells form a grid of `cell_width` x `cell_height` rectangles
/// whose top-left corner is `board_origin`. Menu items are
/// `menu_item_width` x `menu_item_height` rectangles stacked downward from
/// `menu_origin`, `menu_item_spacing` apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub board_origin: (i32, i32),
    pub cell_width: u32,
    pub cell_height: u32,
    pub menu_origin: (i32, i32),
    pub menu_item_width: u32,
    pub menu_item_height: u32,
    pub menu_item_spacing: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            board_origin: (0, 0),
            cell_width: 40,
            cell_height: 40,
            menu_origin: (350, 200),
            menu_item_width: 100,
            menu_item_height: 30,
            menu_item_spacing: 50,
        }
    }
}

impl Layout {
    /// Two terminal columns by one row per cell, below a one-line status bar.
    pub fn terminal() -> Self {
        Self {
            board_origin: (0, 1),
            cell_width: 2,
            cell_height: 1,
            menu_origin: (4, 3),
            menu_item_width: 12,
            menu_item_height: 1,
            menu_item_spacing: 2,
        }
    }

    /// Maps a pointer position to `(row, col)`.
    ///
    /// The result may lie beyond the board's far edges; positions above or
    /// to the left of the board origin yield `None`.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let dx = i64::from(x) - i64::from(self.board_origin.0);
        let dy = i64::from(y) - i64::from(self.board_origin.1);
        if dx < 0 || dy < 0 {
            return None;
        }
        let col = dx.checked_div(i64::from(self.cell_width))?;
        let row = dy.checked_div(i64::from(self.cell_height))?;
        Some((usize::try_from(row).ok()?, usize::try_from(col).ok()?))
    }

    /// Top-left pointer position of a board cell. Saturates for positions
    /// too far away to represent.
    pub fn cell_origin(&self, row: usize, col: usize) -> (i64, i64) {
        let offset = |origin: i32, size: u32, index: usize| {
            let index = i64::try_from(index).unwrap_or(i64::MAX);
            i64::from(origin).saturating_add(i64::from(size).saturating_mul(index))
        };
        (
            offset(self.board_origin.0, self.cell_width, col),
            offset(self.board_origin.1, self.cell_height, row),
        )
    }

    /// Top-left pointer position of the menu item at `index`.
    pub fn menu_item_origin(&self, index: usize) -> (i32, i32) {
        let offset = i64::from(self.menu_item_spacing) * index as i64;
        let y = i64::from(self.menu_origin.1) + offset;
        (self.menu_origin.0, i32::try_from(y).unwrap_or(i32::MAX))
    }

    /// The index of the menu item whose region contains the pointer position, if any.
    pub fn menu_item_at(&self, x: i32, y: i32, num_items: usize) -> Option<usize> {
        (0..num_items).find(|&index| {
            let (left, top) = self.menu_item_origin(index);
            let dx = i64::from(x) - i64::from(left);
            let dy = i64::from(y) - i64::from(top);
            (0..i64::from(self.menu_item_width)).contains(&dx)
                && (0..i64::from(self.menu_item_height)).contains(&dy)
        })
    }
}

// Merges `overrides` into `base`, recursing into objects so that a partial
// nested object only replaces the keys it mentions.
fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_match_the_classic_game() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (20, 15));
        assert_eq!(config.win_length, 5);
        assert_eq!(config.auto_reset_delay, Duration::from_secs(3));
        assert_eq!(config.layout.cell_width, 40);
        assert_eq!(config.layout.cell_height, 40);
        assert!(config.validate().is_ok());
        assert!(GameConfig::terminal().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_the_remaining_fields() {
        let config = GameConfig::merged(
            &GameConfig::terminal(),
            json!({
                "width": 9,
                "auto_reset_delay_secs": 1.5,
                "layout": { "cell_width": 3 }
            }),
        )
        .unwrap();
        assert_eq!(config.width, 9);
        assert_eq!(config.height, 15);
        assert_eq!(config.auto_reset_delay, Duration::from_millis(1500));
        assert_eq!(config.layout.cell_width, 3);
        assert_eq!(config.layout.cell_height, 1);
        assert_eq!(config.layout.menu_origin, Layout::terminal().menu_origin);
    }

    #[test]
    fn serialized_config_reads_back() {
        let config = GameConfig::terminal();
        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains("\"auto_reset_delay_secs\":3.0"));
        let parsed: GameConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let base = GameConfig::default();
        let cases = [
            (json!({ "width": 0 }), InvalidConfig::ZeroWidth),
            (json!({ "height": 0 }), InvalidConfig::ZeroHeight),
            (json!({ "win_length": 0 }), InvalidConfig::ZeroWinLength),
            (json!({ "layout": { "cell_height": 0 } }), InvalidConfig::ZeroCellSize),
        ];
        for (overrides, expected) in cases {
            let err = GameConfig::merged(&base, overrides).unwrap_err();
            assert_eq!(err.downcast_ref::<InvalidConfig>(), Some(&expected));
        }
    }

    #[test]
    fn oversized_board_is_rejected() {
        let config = GameConfig {
            width: usize::MAX,
            ..GameConfig::terminal()
        };
        assert_eq!(config.validate(), Err(InvalidConfig::BoardTooLarge));
        assert_eq!(config.required_area(), (u32::MAX, 16));

        let err = GameConfig::merged(&GameConfig::terminal(), json!({ "height": u64::MAX }))
            .unwrap_err();
        assert_eq!(err.downcast_ref::<InvalidConfig>(), Some(&InvalidConfig::BoardTooLarge));
    }

    #[test]
    fn far_cells_saturate() {
        let layout = Layout::terminal();
        assert_eq!(layout.cell_origin(usize::MAX, usize::MAX), (i64::MAX, i64::MAX));
        assert_eq!(layout.cell_origin(3, 4), (8, 4));
    }

    #[test]
    fn negative_delay_is_an_error() {
        let overrides = json!({ "auto_reset_delay_secs": -1.0 });
        assert!(GameConfig::merged(&GameConfig::default(), overrides).is_err());
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("inarow-config-{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        write!(file, r#"{{ "win_length": 4 }}"#).unwrap();
        drop(file);

        let config = GameConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.win_length, 4);
        assert_eq!(config.layout, Layout::default());

        assert!(GameConfig::load(&path).is_err());
    }

    #[test]
    fn pointer_to_cell() {
        let layout = Layout::default();
        assert_eq!(layout.cell_at(0, 0), Some((0, 0)));
        assert_eq!(layout.cell_at(39, 39), Some((0, 0)));
        assert_eq!(layout.cell_at(40, 81), Some((2, 1)));
        assert_eq!(layout.cell_at(-1, 10), None);

        let layout = Layout::terminal();
        assert_eq!(layout.cell_at(5, 1), Some((0, 2)));
        assert_eq!(layout.cell_at(5, 0), None);
        assert_eq!(layout.cell_origin(0, 2), (4, 1));
    }

    #[test]
    fn pointer_to_menu_item() {
        let layout = Layout::default();
        assert_eq!(layout.menu_item_at(350, 200, 3), Some(0));
        assert_eq!(layout.menu_item_at(449, 229, 3), Some(0));
        assert_eq!(layout.menu_item_at(400, 260, 3), Some(1));
        assert_eq!(layout.menu_item_at(400, 310, 3), Some(2));
        // Between two items
        assert_eq!(layout.menu_item_at(400, 235, 3), None);
        assert_eq!(layout.menu_item_at(450, 200, 3), None);
        assert_eq!(layout.menu_item_at(400, 360, 3), None);
    }

    #[test]
    fn required_area_covers_board_and_menu() {
        assert_eq!(GameConfig::default().required_area(), (800, 600));
        assert_eq!(GameConfig::terminal().required_area(), (40, 16));
    }
}
