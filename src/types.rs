use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Registry name of an item, e.g. `cobblestone` or `diamond_pickaxe`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Registry name of a block kind, e.g. `stone` or `oak_log`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKind(pub String);

impl BlockKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockKind {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Material a tool is being rated against. Materials are block kinds.
pub type Material = BlockKind;

/// A block kind plus its state properties (facing, axis, half, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockState {
    pub block: BlockKind,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl BlockState {
    /// Default state of a block kind
    pub fn of(block: impl Into<BlockKind>) -> Self {
        Self {
            block: block.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }
}

/// Integer world coordinates of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Mining capability carried by tool items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolProfile {
    /// Base speed applied to materials in `effective_on`
    pub speed: f64,
    /// Materials this tool mines at `speed`
    #[serde(default)]
    pub effective_on: Vec<Material>,
    /// Efficiency enchantment level, 0 when absent
    #[serde(default)]
    pub efficiency: u32,
}

/// Represents an item in an inventory slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub id: ItemId,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub damage: u32,
    /// Zero for items that never take damage
    #[serde(default)]
    pub max_damage: u32,
    #[serde(default)]
    pub tool: Option<ToolProfile>,
    /// Block this item places when used on the world
    #[serde(default)]
    pub places: Option<BlockKind>,
}

fn default_count() -> u32 {
    1
}

impl ItemStack {
    /// A plain stack with no tool or block behaviour
    pub fn new(id: impl Into<String>, count: u32) -> Self {
        Self {
            id: ItemId::new(id),
            count,
            damage: 0,
            max_damage: 0,
            tool: None,
            places: None,
        }
    }

    /// A stack of a block item that places its own kind
    pub fn block(id: &str, count: u32) -> Self {
        Self {
            places: Some(BlockKind::new(id)),
            ..Self::new(id, count)
        }
    }

    /// A single tool with the given durability and mining profile
    pub fn tool(id: &str, max_damage: u32, profile: ToolProfile) -> Self {
        Self {
            max_damage,
            tool: Some(profile),
            ..Self::new(id, 1)
        }
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    pub fn is_tool(&self) -> bool {
        self.tool.is_some()
    }

    pub fn is(&self, id: &ItemId) -> bool {
        &self.id == id
    }
}
