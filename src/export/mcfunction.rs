//! Minecraft function file output

use crate::core::types::IVec3;
use crate::math::BlockBox;
use crate::voxel::pos::BlockPos;
use super::regions::FillRegion;

/// Most cells a single `fill` command may touch
pub const MAX_FILL_VOLUME: u64 = 32768;

/// Render regions as `setblock`/`fill` commands, one per line.
///
/// Every coordinate is translated by `offset`. Regions above
/// [`MAX_FILL_VOLUME`] are halved along their longest axis until they fit.
pub fn to_mcfunction(regions: &[FillRegion], offset: IVec3) -> String {
    let mut commands = Vec::with_capacity(regions.len());
    let mut cells = 0u64;

    for region in regions {
        cells += region.volume();
        let mut pending = vec![region.bounds()];
        while let Some(area) = pending.pop() {
            if area.volume() > MAX_FILL_VOLUME {
                if let Some((lo, hi)) = area.split_longest() {
                    // Push hi first so lo is emitted first
                    pending.push(hi);
                    pending.push(lo);
                    continue;
                }
            }
            commands.push(command(&area, offset, region.block.as_str()));
        }
    }

    log::debug!("Exported {} regions as {} commands", regions.len(), commands.len());

    let mut out = String::new();
    out.push_str("# Generated by blockplan\n");
    out.push_str(&format!("# {} blocks in {} regions, {} commands\n", cells, regions.len(), commands.len()));
    out.push_str(&format!("# Origin offset: {} {} {}\n", offset.x, offset.y, offset.z));
    for line in commands {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn command(area: &BlockBox, offset: IVec3, block: &str) -> String {
    let start = translate(area.min, offset);
    if area.min == area.max {
        return format!("setblock {} {} {} {}", start.x, start.y, start.z, block);
    }
    let end = translate(area.max, offset);
    format!(
        "fill {} {} {} {} {} {} {}",
        start.x, start.y, start.z, end.x, end.y, end.z, block
    )
}

fn translate(pos: BlockPos, offset: IVec3) -> IVec3 {
    pos.to_ivec3() + offset
}
