use crate::shape_store::ShapeStore;

/// Manages shape selection state.
///
/// `SelectionManager` is responsible for:
/// - Tracking which shape, if any, is selected
/// - Keeping the selection consistent with the store when shapes are removed
///
/// # Selection Model
///
/// At most one shape is selected at a time. Selecting a new shape replaces
/// the previous selection; resolving a click to no shape clears it.
///
/// # Design
///
/// The manager only holds an id. Lookups and removals go through
/// `ShapeStore`, which remains the sole owner of the records.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    /// The ID of the selected shape, if any
    selected_id: Option<u64>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use siteplan_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_id(), None);
    /// ```
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    /// Returns the ID of the selected shape.
    ///
    /// # Returns
    ///
    /// `Some(id)` if a shape is selected, `None` otherwise.
    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    /// Returns `true` if `id` is the selected shape.
    pub fn is_selected(&self, id: u64) -> bool {
        self.selected_id == Some(id)
    }

    /// Clears the selection.
    pub fn deselect_all(&mut self) {
        self.selected_id = None;
    }

    /// Selects `id` if the store holds it, otherwise clears the selection.
    ///
    /// # Arguments
    ///
    /// * `store` - The shape store used to validate the id
    /// * `id` - The shape to select
    ///
    /// # Returns
    ///
    /// The resulting selection.
    pub fn select(&mut self, store: &ShapeStore, id: Option<u64>) -> Option<u64> {
        self.selected_id = id.filter(|&id| store.contains(id));
        self.selected_id
    }

    /// Notifies the manager that `id` has left the store.
    ///
    /// Clears the selection if and only if `id` was the selected shape.
    ///
    /// # Returns
    ///
    /// `true` if the selection was cleared.
    pub fn on_removed(&mut self, id: u64) -> bool {
        if self.is_selected(id) {
            self.selected_id = None;
            true
        } else {
            false
        }
    }
}
