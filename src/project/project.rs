//! Project facade tying the store, groups, history and editor state together

use std::path::Path;

use crate::core::error::Error;
use crate::core::types::{IVec3, Result};
use crate::export::{self, FillRegion};
use crate::group::{BlockGroup, GroupId, GroupManager};
use crate::math::Axis;
use crate::voxel::block::BlockType;
use crate::voxel::edit::History;
use crate::voxel::flood;
use crate::voxel::pos::BlockPos;
use crate::voxel::store::{Dimensions, VoxelStore};
use super::config::ProjectConfig;
use super::editor::EditorState;
use super::snapshot::ProjectSnapshot;

/// A build plan: voxels, groups and the edit history over them.
///
/// Every mutator records into the history and refreshes the editor's
/// undo/redo flags. Failed operations leave all state as it was.
#[derive(Debug)]
pub struct Project {
    config: ProjectConfig,
    store: VoxelStore,
    groups: GroupManager,
    history: History,
    editor: EditorState,
}

impl Default for Project {
    fn default() -> Self {
        Self::new(ProjectConfig::default())
    }
}

impl Project {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            store: VoxelStore::new(config.dimensions.with_world_height()),
            groups: GroupManager::new(),
            history: History::new(),
            editor: EditorState::new(),
            config,
        }
    }

    /// Start over with empty contents. Height is forced to the world height.
    pub fn initialize(&mut self, dimensions: Dimensions) -> Result<()> {
        let dimensions = dimensions.with_world_height();
        if dimensions.bounds().is_none() {
            return Err(Error::InvalidProject(format!(
                "dimensions [{}, {}, {}] have zero width or depth",
                dimensions.width, dimensions.height, dimensions.depth
            )));
        }

        self.store = VoxelStore::new(dimensions);
        self.groups = GroupManager::new();
        self.history.clear();
        self.editor.reset();
        log::info!(
            "Initialized project {}x{}x{}",
            dimensions.width, dimensions.height, dimensions.depth
        );
        Ok(())
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn store(&self) -> &VoxelStore {
        &self.store
    }

    pub fn dimensions(&self) -> Dimensions {
        self.store.dimensions()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn groups(&self) -> &GroupManager {
        &self.groups
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    // --- Editor ---

    pub fn set_selection(&mut self, start: Option<BlockPos>, end: Option<BlockPos>) {
        self.editor.selection_start = start;
        self.editor.selection_end = end;
    }

    pub fn set_current_layer(&mut self, layer: i32) {
        self.editor.current_layer = layer;
    }

    pub fn set_selected_block(&mut self, block: BlockType) {
        self.editor.selected_block = block;
    }

    // --- Voxels ---

    pub fn get_block(&self, pos: BlockPos) -> Option<&BlockType> {
        self.store.get(pos)
    }

    pub fn set_block(&mut self, pos: BlockPos, block: BlockType) -> bool {
        let changed = self.store.set_block(&mut self.history, pos, block);
        self.sync_editor();
        changed
    }

    /// Place the editor's selected block
    pub fn place_block(&mut self, pos: BlockPos) -> bool {
        let block = self.editor.selected_block.clone();
        self.set_block(pos, block)
    }

    pub fn remove_block(&mut self, pos: BlockPos) -> bool {
        let changed = self.store.remove_block(&mut self.history, pos);
        self.sync_editor();
        changed
    }

    pub fn fill_area(&mut self, start: BlockPos, end: BlockPos, block: BlockType) -> usize {
        let count = self.store.fill_area(&mut self.history, start, end, block);
        self.sync_editor();
        count
    }

    pub fn clear_area(&mut self, start: BlockPos, end: BlockPos) -> usize {
        let count = self.store.clear_area(&mut self.history, start, end);
        self.sync_editor();
        count
    }

    /// Fill the current selection with the selected block
    pub fn fill_selection(&mut self) -> Result<usize> {
        let (start, end) = self.editor.selection().ok_or(Error::EmptySelection)?;
        let block = self.editor.selected_block.clone();
        Ok(self.fill_area(start, end, block))
    }

    /// Flood fill limited by the configured cell budget
    pub fn flood_fill(&mut self, start: BlockPos, block: BlockType) -> Result<usize> {
        let result = flood::flood_fill(
            &mut self.store,
            &mut self.history,
            start,
            block,
            self.config.flood_fill_limit,
        );
        self.sync_editor();
        result
    }

    // --- Groups ---

    pub fn group(&self, id: &GroupId) -> Option<&BlockGroup> {
        self.groups.get(id)
    }

    pub fn active_group(&self) -> Option<&BlockGroup> {
        self.groups.active_group()
    }

    pub fn set_active_group(&mut self, id: Option<GroupId>) -> bool {
        self.groups.set_active(id)
    }

    /// Group the blocks in a box and clear the selection.
    /// `None` uses the configured default name.
    pub fn create_group(&mut self, start: BlockPos, end: BlockPos, name: Option<&str>) -> Result<GroupId> {
        let name = name.unwrap_or(&self.config.default_group_name);
        let id = self
            .groups
            .create_group(&self.store, &mut self.history, start, end, name)?;
        self.editor.clear_selection();
        self.sync_editor();
        Ok(id)
    }

    /// Group the blocks in the current selection
    pub fn create_group_from_selection(&mut self, name: Option<&str>) -> Result<GroupId> {
        let (start, end) = self.editor.selection().ok_or(Error::EmptySelection)?;
        self.create_group(start, end, name)
    }

    pub fn remove_group(&mut self, id: &GroupId) -> Result<()> {
        self.groups.remove_group(&mut self.history, id)?;
        self.sync_editor();
        Ok(())
    }

    pub fn move_group(&mut self, id: &GroupId, offset: IVec3) -> Result<()> {
        self.groups
            .move_group(&mut self.store, &mut self.history, id, offset)?;
        self.sync_editor();
        Ok(())
    }

    pub fn rotate_group(&mut self, id: &GroupId, axis: Axis, degrees: f64) -> Result<()> {
        self.groups
            .rotate_group(&mut self.store, &mut self.history, id, axis, degrees)?;
        self.sync_editor();
        Ok(())
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        let done = self.history.undo(&mut self.store, &mut self.groups);
        self.sync_editor();
        done
    }

    pub fn redo(&mut self) -> bool {
        let done = self.history.redo(&mut self.store, &mut self.groups);
        self.sync_editor();
        done
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Persistence ---

    pub fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot::capture(&self.store, &self.groups)
    }

    /// Serialize to pretty JSON
    pub fn save(&self) -> Result<String> {
        self.snapshot().to_json()
    }

    /// Replace all state from JSON text. History, active group and
    /// selection are reset. On error nothing changes.
    pub fn load(&mut self, data: &str) -> Result<()> {
        let state = ProjectSnapshot::from_json(data)?.into_state()?;

        self.store.reset(state.dimensions, state.voxels);
        self.groups.reset(state.groups);
        self.history.clear();
        self.editor.reset();
        log::info!(
            "Loaded project with {} voxels and {} groups",
            self.store.len(),
            self.groups.len()
        );
        Ok(())
    }

    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.save()?;
        tokio::fs::write(path.as_ref(), json).await?;
        log::info!("Saved project to {}", path.as_ref().display());
        Ok(())
    }

    pub fn save_to_file_sync(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.save()?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Saved project to {}", path.as_ref().display());
        Ok(())
    }

    pub async fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let data = tokio::fs::read_to_string(path.as_ref()).await?;
        self.load(&data)
    }

    pub fn load_from_file_sync(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let data = std::fs::read_to_string(path.as_ref())?;
        self.load(&data)
    }

    // --- Export ---

    pub fn optimize_regions(&self) -> Vec<FillRegion> {
        export::optimize_regions(self.store.voxels(), self.store.dimensions())
    }

    /// Command text for the whole build, translated by `offset`
    pub fn export_mcfunction(&self, offset: IVec3) -> String {
        export::to_mcfunction(&self.optimize_regions(), offset)
    }

    fn sync_editor(&mut self) {
        self.editor.can_undo = self.history.can_undo();
        self.editor.can_redo = self.history.can_redo();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::store::WORLD_HEIGHT;
    use tempfile::TempDir;

    fn block(id: &str) -> BlockType {
        BlockType::parse(id).unwrap()
    }

    fn small_project() -> Project {
        Project::new(ProjectConfig::default().with_dimensions(Dimensions::new(32, WORLD_HEIGHT, 32)))
    }

    #[test]
    fn test_group_move_scenario() {
        let mut project = Project::default();
        project.set_block(BlockPos::new(0, 0, 0), block("stone"));
        project.set_block(BlockPos::new(1, 0, 0), block("dirt"));

        let id = project
            .create_group(BlockPos::new(0, 0, 0), BlockPos::new(1, 0, 0), Some("G"))
            .unwrap();
        let group = project.group(&id).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.origin, BlockPos::new(0, 0, 0));

        project.move_group(&id, IVec3::new(0, 1, 0)).unwrap();
        let mut keys: Vec<_> = project.store().voxels().keys().copied().collect();
        keys.sort();
        assert_eq!(keys, vec![BlockPos::new(0, 1, 0), BlockPos::new(1, 1, 0)]);

        assert!(project.undo());
        assert_eq!(project.get_block(BlockPos::new(0, 0, 0)), Some(&block("stone")));
        assert_eq!(project.get_block(BlockPos::new(1, 0, 0)), Some(&block("dirt")));
        assert!(project.get_block(BlockPos::new(0, 1, 0)).is_none());
        assert!(project.get_block(BlockPos::new(1, 1, 0)).is_none());
    }

    #[test]
    fn test_editor_flags_follow_history() {
        let mut project = small_project();
        assert!(!project.editor().can_undo);

        project.set_block(BlockPos::new(0, 0, 0), block("stone"));
        assert!(project.editor().can_undo);
        assert!(!project.editor().can_redo);

        project.undo();
        assert!(!project.editor().can_undo);
        assert!(project.editor().can_redo);
    }

    #[test]
    fn test_create_group_clears_selection() {
        let mut project = small_project();
        project.fill_area(BlockPos::new(0, 0, 0), BlockPos::new(2, 2, 2), block("stone"));
        project.set_selection(Some(BlockPos::new(0, 0, 0)), Some(BlockPos::new(1, 1, 1)));

        let id = project.create_group_from_selection(None).unwrap();
        assert_eq!(project.group(&id).unwrap().name, "Group");
        assert_eq!(project.group(&id).unwrap().len(), 8);
        assert!(project.editor().selection().is_none());
        assert_eq!(project.active_group().map(|g| &g.id), Some(&id));
    }

    #[test]
    fn test_group_remove_leaves_voxels() {
        let mut project = small_project();
        project.fill_area(BlockPos::new(0, 0, 0), BlockPos::new(3, 0, 0), block("stone"));
        let id = project.create_group(BlockPos::new(0, 0, 0), BlockPos::new(3, 0, 0), None).unwrap();
        project.remove_group(&id).unwrap();
        assert_eq!(project.store().len(), 4);
        assert!(project.active_group().is_none());

        project.undo();
        assert!(project.group(&id).is_some());
    }

    #[test]
    fn test_selection_ops_need_selection() {
        let mut project = small_project();
        assert!(matches!(project.fill_selection(), Err(Error::EmptySelection)));
        assert!(matches!(project.create_group_from_selection(Some("x")), Err(Error::EmptySelection)));
    }

    #[test]
    fn test_flood_fill_uses_configured_limit() {
        let mut config = ProjectConfig::default().with_dimensions(Dimensions::new(8, WORLD_HEIGHT, 8));
        config.flood_fill_limit = 10;
        let mut project = Project::new(config);
        assert!(matches!(
            project.flood_fill(BlockPos::new(0, 0, 0), block("water")),
            Err(Error::FloodFillLimit(10))
        ));
        assert!(project.store().is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut project = small_project();
        project.fill_area(BlockPos::new(0, -64, 0), BlockPos::new(3, -62, 3), block("deepslate"));
        project.set_block(BlockPos::new(5, 100, 5), block("mymod:crystal"));
        let id = project.create_group(BlockPos::new(0, -64, 0), BlockPos::new(1, -64, 1), Some("Base")).unwrap();
        project.rotate_group(&id, Axis::Y, 180.0).unwrap();

        let json = project.save().unwrap();
        let mut loaded = Project::default();
        loaded.load(&json).unwrap();

        assert_eq!(loaded.store().voxels(), project.store().voxels());
        assert_eq!(loaded.groups().groups(), project.groups().groups());
        assert_eq!(loaded.dimensions(), project.dimensions());
        assert!(!loaded.can_undo());
        assert!(loaded.active_group().is_none());
        assert_eq!(loaded.save().unwrap(), json);
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let mut project = small_project();
        project.set_block(BlockPos::new(1, 1, 1), block("stone"));

        assert!(project.load(r#"{"version":"1.0.0","voxels":{}}"#).is_err());
        assert!(project.load(r#"{"dimensions":[4,384,4],"voxels":{"1,1,1":"Bad Id"}}"#).is_err());
        assert!(project.load("not json").is_err());

        assert_eq!(project.store().len(), 1);
        assert!(project.can_undo());
    }

    #[test]
    fn test_initialize_resets() {
        let mut project = small_project();
        project.set_block(BlockPos::new(1, 1, 1), block("stone"));
        project.set_current_layer(7);
        project.initialize(Dimensions::new(50, 10, 60)).unwrap();

        assert!(project.store().is_empty());
        assert!(!project.can_undo());
        assert_eq!(project.editor().current_layer, 0);
        assert_eq!(project.dimensions(), Dimensions::new(50, WORLD_HEIGHT, 60));
        assert!(project.initialize(Dimensions::new(0, 10, 60)).is_err());
    }

    #[test]
    fn test_export_mcfunction() {
        let mut project = small_project();
        project.fill_area(BlockPos::new(0, 0, 0), BlockPos::new(4, 0, 0), block("stone"));
        project.set_block(BlockPos::new(9, 9, 9), block("glass"));

        let text = project.export_mcfunction(IVec3::new(10, 0, 0));
        let commands: Vec<_> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(commands, vec!["fill 10 0 0 14 0 0 minecraft:stone", "setblock 19 9 9 minecraft:glass"]);
    }

    #[test]
    fn test_file_roundtrip_sync() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        let mut project = small_project();
        project.set_block(BlockPos::new(2, 3, 4), block("oak_log"));
        project.save_to_file_sync(&path).unwrap();

        let mut loaded = Project::default();
        loaded.load_from_file_sync(&path).unwrap();
        assert_eq!(loaded.get_block(BlockPos::new(2, 3, 4)), Some(&block("oak_log")));
    }

    #[tokio::test]
    async fn test_file_roundtrip_async() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        let mut project = small_project();
        project.fill_area(BlockPos::new(0, 0, 0), BlockPos::new(1, 1, 1), block("bricks"));
        project.save_to_file(&path).await.unwrap();

        let mut loaded = Project::default();
        loaded.load_from_file(&path).await.unwrap();
        assert_eq!(loaded.store().len(), 8);
        assert!(loaded.load_from_file(dir.path().join("missing.json")).await.is_err());
    }
}
