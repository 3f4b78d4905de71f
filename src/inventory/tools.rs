use crate::config::Settings;
use crate::inventory::Inventory;
use crate::types::{ItemStack, Material};

/// Mining speed of `stack` against `material`, enchantments included.
///
/// A tool that is effective on the material mines at its base speed plus
/// `level² + 1` for an efficiency level above zero. Anything else mines at
/// hand speed.
pub fn mining_speed(stack: &ItemStack, material: &Material) -> f64 {
    let Some(tool) = stack.tool.as_ref() else {
        return 1.0;
    };
    if !tool.effective_on.contains(material) {
        return 1.0;
    }
    let mut speed = tool.speed;
    if tool.efficiency > 0 {
        let level = f64::from(tool.efficiency);
        speed += level * level + 1.0;
    }
    speed
}

/// Whether item saver keeps this stack out of use.
///
/// Items with a max durability of 0 or 1 are never held back.
pub fn too_damaged(stack: &ItemStack, settings: &Settings) -> bool {
    settings.item_saver
        && stack.max_damage > 1
        && stack.damage.saturating_add(settings.item_saver_threshold) >= stack.max_damage
}

/// Index of the fastest usable tool against `material`, scanning all 36 slots.
///
/// Ties keep the lowest index.
pub fn best_tool_against(inventory: &Inventory, material: &Material, settings: &Settings) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, slot) in inventory.iter() {
        let Some(stack) = slot else {
            continue;
        };
        if too_damaged(stack, settings) || !stack.is_tool() {
            continue;
        }
        let speed = mining_speed(stack, material);
        if best.map_or(true, |(_, best_speed)| speed > best_speed) {
            best = Some((i, speed));
        }
    }
    best.map(|(i, _)| i)
}
