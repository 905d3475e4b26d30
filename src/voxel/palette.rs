//! Built-in block palette

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Palette grouping shown by block pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockCategory {
    Building,
    Decoration,
    Redstone,
    Natural,
    Ores,
    Liquids,
    Special,
}

impl BlockCategory {
    pub const ALL: [BlockCategory; 7] = [
        BlockCategory::Building,
        BlockCategory::Decoration,
        BlockCategory::Redstone,
        BlockCategory::Natural,
        BlockCategory::Ores,
        BlockCategory::Liquids,
        BlockCategory::Special,
    ];
}

impl fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A known block id and its category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub id: &'static str,
    pub category: BlockCategory,
}

const fn entry(id: &'static str, category: BlockCategory) -> PaletteEntry {
    PaletteEntry { id, category }
}

/// Id of the block selected by default
pub const DEFAULT_BLOCK_ID: &str = "minecraft:stone";

/// Every built-in block, in picker order
pub static PALETTE: &[PaletteEntry] = &[
    entry("minecraft:stone", BlockCategory::Building),
    entry("minecraft:granite", BlockCategory::Building),
    entry("minecraft:polished_granite", BlockCategory::Building),
    entry("minecraft:diorite", BlockCategory::Building),
    entry("minecraft:polished_diorite", BlockCategory::Building),
    entry("minecraft:andesite", BlockCategory::Building),
    entry("minecraft:polished_andesite", BlockCategory::Building),
    entry("minecraft:cobblestone", BlockCategory::Building),
    entry("minecraft:oak_planks", BlockCategory::Building),
    entry("minecraft:spruce_planks", BlockCategory::Building),
    entry("minecraft:birch_planks", BlockCategory::Building),
    entry("minecraft:jungle_planks", BlockCategory::Building),
    entry("minecraft:acacia_planks", BlockCategory::Building),
    entry("minecraft:dark_oak_planks", BlockCategory::Building),
    entry("minecraft:bricks", BlockCategory::Building),
    entry("minecraft:stone_bricks", BlockCategory::Building),
    entry("minecraft:mossy_stone_bricks", BlockCategory::Building),
    entry("minecraft:cracked_stone_bricks", BlockCategory::Building),
    entry("minecraft:chiseled_stone_bricks", BlockCategory::Building),
    entry("minecraft:sandstone", BlockCategory::Building),
    entry("minecraft:chiseled_sandstone", BlockCategory::Building),
    entry("minecraft:cut_sandstone", BlockCategory::Building),
    entry("minecraft:nether_bricks", BlockCategory::Building),
    entry("minecraft:quartz_block", BlockCategory::Building),
    entry("minecraft:chiseled_quartz_block", BlockCategory::Building),
    entry("minecraft:quartz_pillar", BlockCategory::Building),
    entry("minecraft:terracotta", BlockCategory::Building),
    entry("minecraft:prismarine", BlockCategory::Building),
    entry("minecraft:prismarine_bricks", BlockCategory::Building),
    entry("minecraft:dark_prismarine", BlockCategory::Building),
    entry("minecraft:white_wool", BlockCategory::Decoration),
    entry("minecraft:orange_wool", BlockCategory::Decoration),
    entry("minecraft:magenta_wool", BlockCategory::Decoration),
    entry("minecraft:light_blue_wool", BlockCategory::Decoration),
    entry("minecraft:yellow_wool", BlockCategory::Decoration),
    entry("minecraft:lime_wool", BlockCategory::Decoration),
    entry("minecraft:pink_wool", BlockCategory::Decoration),
    entry("minecraft:gray_wool", BlockCategory::Decoration),
    entry("minecraft:light_gray_wool", BlockCategory::Decoration),
    entry("minecraft:cyan_wool", BlockCategory::Decoration),
    entry("minecraft:purple_wool", BlockCategory::Decoration),
    entry("minecraft:blue_wool", BlockCategory::Decoration),
    entry("minecraft:brown_wool", BlockCategory::Decoration),
    entry("minecraft:green_wool", BlockCategory::Decoration),
    entry("minecraft:red_wool", BlockCategory::Decoration),
    entry("minecraft:black_wool", BlockCategory::Decoration),
    entry("minecraft:glass", BlockCategory::Decoration),
    entry("minecraft:white_stained_glass", BlockCategory::Decoration),
    entry("minecraft:orange_stained_glass", BlockCategory::Decoration),
    entry("minecraft:magenta_stained_glass", BlockCategory::Decoration),
    entry("minecraft:light_blue_stained_glass", BlockCategory::Decoration),
    entry("minecraft:yellow_stained_glass", BlockCategory::Decoration),
    entry("minecraft:lime_stained_glass", BlockCategory::Decoration),
    entry("minecraft:pink_stained_glass", BlockCategory::Decoration),
    entry("minecraft:gray_stained_glass", BlockCategory::Decoration),
    entry("minecraft:light_gray_stained_glass", BlockCategory::Decoration),
    entry("minecraft:cyan_stained_glass", BlockCategory::Decoration),
    entry("minecraft:purple_stained_glass", BlockCategory::Decoration),
    entry("minecraft:blue_stained_glass", BlockCategory::Decoration),
    entry("minecraft:brown_stained_glass", BlockCategory::Decoration),
    entry("minecraft:green_stained_glass", BlockCategory::Decoration),
    entry("minecraft:red_stained_glass", BlockCategory::Decoration),
    entry("minecraft:black_stained_glass", BlockCategory::Decoration),
    entry("minecraft:bookshelf", BlockCategory::Decoration),
    entry("minecraft:crafting_table", BlockCategory::Decoration),
    entry("minecraft:furnace", BlockCategory::Decoration),
    entry("minecraft:jack_o_lantern", BlockCategory::Decoration),
    entry("minecraft:sea_lantern", BlockCategory::Decoration),
    entry("minecraft:hay_block", BlockCategory::Decoration),
    entry("minecraft:redstone_ore", BlockCategory::Redstone),
    entry("minecraft:redstone_block", BlockCategory::Redstone),
    entry("minecraft:redstone_lamp", BlockCategory::Redstone),
    entry("minecraft:tnt", BlockCategory::Redstone),
    entry("minecraft:command_block", BlockCategory::Redstone),
    entry("minecraft:grass_block", BlockCategory::Natural),
    entry("minecraft:dirt", BlockCategory::Natural),
    entry("minecraft:coarse_dirt", BlockCategory::Natural),
    entry("minecraft:podzol", BlockCategory::Natural),
    entry("minecraft:sand", BlockCategory::Natural),
    entry("minecraft:red_sand", BlockCategory::Natural),
    entry("minecraft:gravel", BlockCategory::Natural),
    entry("minecraft:oak_log", BlockCategory::Natural),
    entry("minecraft:spruce_log", BlockCategory::Natural),
    entry("minecraft:birch_log", BlockCategory::Natural),
    entry("minecraft:jungle_log", BlockCategory::Natural),
    entry("minecraft:acacia_log", BlockCategory::Natural),
    entry("minecraft:dark_oak_log", BlockCategory::Natural),
    entry("minecraft:oak_wood", BlockCategory::Natural),
    entry("minecraft:spruce_wood", BlockCategory::Natural),
    entry("minecraft:birch_wood", BlockCategory::Natural),
    entry("minecraft:jungle_wood", BlockCategory::Natural),
    entry("minecraft:acacia_wood", BlockCategory::Natural),
    entry("minecraft:dark_oak_wood", BlockCategory::Natural),
    entry("minecraft:oak_leaves", BlockCategory::Natural),
    entry("minecraft:spruce_leaves", BlockCategory::Natural),
    entry("minecraft:birch_leaves", BlockCategory::Natural),
    entry("minecraft:jungle_leaves", BlockCategory::Natural),
    entry("minecraft:acacia_leaves", BlockCategory::Natural),
    entry("minecraft:dark_oak_leaves", BlockCategory::Natural),
    entry("minecraft:snow_block", BlockCategory::Natural),
    entry("minecraft:ice", BlockCategory::Natural),
    entry("minecraft:packed_ice", BlockCategory::Natural),
    entry("minecraft:clay", BlockCategory::Natural),
    entry("minecraft:pumpkin", BlockCategory::Natural),
    entry("minecraft:melon", BlockCategory::Natural),
    entry("minecraft:mycelium", BlockCategory::Natural),
    entry("minecraft:netherrack", BlockCategory::Natural),
    entry("minecraft:soul_sand", BlockCategory::Natural),
    entry("minecraft:end_stone", BlockCategory::Natural),
    entry("minecraft:sponge", BlockCategory::Natural),
    entry("minecraft:wet_sponge", BlockCategory::Natural),
    entry("minecraft:mossy_cobblestone", BlockCategory::Natural),
    entry("minecraft:coal_ore", BlockCategory::Ores),
    entry("minecraft:iron_ore", BlockCategory::Ores),
    entry("minecraft:gold_ore", BlockCategory::Ores),
    entry("minecraft:lapis_ore", BlockCategory::Ores),
    entry("minecraft:diamond_ore", BlockCategory::Ores),
    entry("minecraft:emerald_ore", BlockCategory::Ores),
    entry("minecraft:quartz_ore", BlockCategory::Ores),
    entry("minecraft:water", BlockCategory::Liquids),
    entry("minecraft:lava", BlockCategory::Liquids),
    entry("minecraft:gold_block", BlockCategory::Special),
    entry("minecraft:iron_block", BlockCategory::Special),
    entry("minecraft:diamond_block", BlockCategory::Special),
    entry("minecraft:emerald_block", BlockCategory::Special),
    entry("minecraft:lapis_block", BlockCategory::Special),
    entry("minecraft:coal_block", BlockCategory::Special),
    entry("minecraft:obsidian", BlockCategory::Special),
    entry("minecraft:glowstone", BlockCategory::Special),
    entry("minecraft:beacon", BlockCategory::Special),
    entry("minecraft:slime_block", BlockCategory::Special),
    entry("minecraft:barrier", BlockCategory::Special),
    entry("minecraft:bedrock", BlockCategory::Special),
    entry("minecraft:air", BlockCategory::Special),
];

fn index() -> &'static HashMap<&'static str, u16> {
    static INDEX: OnceLock<HashMap<&'static str, u16>> = OnceLock::new();
    INDEX.get_or_init(|| {
        PALETTE
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id, i as u16))
            .collect()
    })
}

/// Palette index of a namespaced id
pub fn lookup(id: &str) -> Option<u16> {
    index().get(id).copied()
}

/// Palette entry at an index
pub fn get(index: u16) -> Option<&'static PaletteEntry> {
    PALETTE.get(index as usize)
}

/// All entries in a category
pub fn by_category(category: BlockCategory) -> impl Iterator<Item = &'static PaletteEntry> {
    PALETTE.iter().filter(move |e| e.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_roundtrip() {
        let idx = lookup("minecraft:glass").expect("glass is built in");
        assert_eq!(get(idx).unwrap().id, "minecraft:glass");
        assert_eq!(get(idx).unwrap().category, BlockCategory::Decoration);
    }

    #[test]
    fn test_ids_unique() {
        assert_eq!(index().len(), PALETTE.len());
    }

    #[test]
    fn test_every_category_populated() {
        for category in BlockCategory::ALL {
            assert!(by_category(category).next().is_some(), "{} is empty", category);
        }
        assert_eq!(by_category(BlockCategory::Liquids).count(), 2);
    }

    #[test]
    fn test_default_block_known() {
        assert!(lookup(DEFAULT_BLOCK_ID).is_some());
    }
}
