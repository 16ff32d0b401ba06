//! Path planning model
//!
//! A [`PathPlan`] owns the entry and target fiducial lists, the trajectory
//! table built from them and one reslicing controller per registered viewer.
//! Rulers are kept in sync with their fiducials in both directions, and the
//! rulers' slice-intersection flags follow the controllers.

use crate::config::PlanConfig;
use crate::fiducial::{Fiducial, FiducialId, FiducialList};
use crate::ruler::Ruler;
use crate::trajectory::{FiducialKind, TrajectoryId, TrajectoryItem};
use trajslice_core::{Error, Point3d, Result, TrajectoryLine, Viewer};
use trajslice_reslice::{
    reslice_viewer, ResliceController, ResliceMode, ReslicePanel, ResliceParameters,
};

/// Entry/target fiducials, trajectories and the viewers resliced along them
#[derive(Debug)]
pub struct PathPlan<V> {
    config: PlanConfig,
    entries: FiducialList,
    targets: FiducialList,
    trajectories: Vec<TrajectoryItem>,
    selected: Option<TrajectoryId>,
    next_id: u64,
    reslicers: Vec<ResliceController<V>>,
}

impl<V: Viewer> PathPlan<V> {
    pub fn new(config: PlanConfig) -> Self {
        let (selected, unselected) = (config.selected_opacity, config.unselected_opacity);
        let entries = FiducialList::new("Entry List", selected, unselected);
        let targets = FiducialList::new("Target List", selected, unselected);
        Self {
            config,
            entries,
            targets,
            trajectories: Vec::new(),
            selected: None,
            next_id: 1,
            reslicers: Vec::new(),
        }
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    pub fn entries(&self) -> &FiducialList {
        &self.entries
    }

    pub fn targets(&self) -> &FiducialList {
        &self.targets
    }

    pub fn fiducials(&self, kind: FiducialKind) -> &FiducialList {
        match kind {
            FiducialKind::Entry => &self.entries,
            FiducialKind::Target => &self.targets,
        }
    }

    fn fiducials_mut(&mut self, kind: FiducialKind) -> &mut FiducialList {
        match kind {
            FiducialKind::Entry => &mut self.entries,
            FiducialKind::Target => &mut self.targets,
        }
    }

    fn fiducial(&self, kind: FiducialKind, id: FiducialId) -> Result<&Fiducial> {
        self.fiducials(kind).get(id).ok_or_else(|| missing_fiducial(kind, id))
    }

    pub fn add_entry<S: Into<String>>(&mut self, name: S, position: Point3d) -> FiducialId {
        self.entries.add(name, position)
    }

    pub fn add_target<S: Into<String>>(&mut self, name: S, position: Point3d) -> FiducialId {
        self.targets.add(name, position)
    }

    pub fn trajectories(&self) -> &[TrajectoryItem] {
        &self.trajectories
    }

    pub fn trajectory(&self, id: TrajectoryId) -> Option<&TrajectoryItem> {
        self.trajectories.iter().find(|t| t.id == id)
    }

    /// Trajectory joining `entry` to `target`, if one exists
    pub fn find_trajectory(&self, entry: FiducialId, target: FiducialId) -> Option<TrajectoryId> {
        self.trajectories.iter().find(|t| t.joins(entry, target)).map(|t| t.id)
    }

    pub fn selected_trajectory(&self) -> Option<&TrajectoryItem> {
        self.selected.and_then(|id| self.trajectory(id))
    }

    fn index_of(&self, id: TrajectoryId) -> Result<usize> {
        self.trajectories
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::MissingTrajectory(id.to_string()))
    }

    /// Register a viewer; it is bound to the selected trajectory, if any
    pub fn add_viewer(&mut self, viewer: V) {
        let mut reslicer = ResliceController::new(viewer, &self.config.reslicing);
        let selected = self
            .selected
            .and_then(|id| self.trajectories.iter().find(|t| t.id == id));
        if let Some(item) = selected {
            reslicer.set_trajectory(&item.ruler);
        }
        log::debug!("Registered viewer '{}'", reslicer.viewer().name());
        self.reslicers.push(reslicer);
    }

    pub fn reslicers(&self) -> &[ResliceController<V>] {
        &self.reslicers
    }

    pub fn reslicer(&self, viewer: &str) -> Option<&ResliceController<V>> {
        self.reslicers.iter().find(|r| r.viewer().name() == viewer)
    }

    /// Add a trajectory from `entry` to `target` and select it.
    ///
    /// The trajectory is named after its entry then its target. A pair that
    /// already has a trajectory is not added twice; its id is returned.
    pub fn add_trajectory(
        &mut self,
        entry: FiducialId,
        target: FiducialId,
    ) -> Result<TrajectoryId> {
        let entry_fiducial = self.fiducial(FiducialKind::Entry, entry)?;
        let target_fiducial = self.fiducial(FiducialKind::Target, target)?;
        if let Some(existing) = self.find_trajectory(entry, target) {
            log::debug!("Trajectory {} already joins {} and {}", existing, entry, target);
            return Ok(existing);
        }

        let id = TrajectoryId(self.next_id);
        let ruler = Ruler::new(
            format!("ruler-{}", self.next_id),
            format!("{}{}", entry_fiducial.name, target_fiducial.name),
            entry_fiducial.position,
            target_fiducial.position,
        );
        self.next_id += 1;

        log::info!("Added trajectory '{}'", ruler.name());
        let no_viewer = self.config.no_viewer_label.clone();
        self.trajectories
            .push(TrajectoryItem::new(id, entry, target, ruler, no_viewer));
        self.select_trajectory(id)?;
        Ok(id)
    }

    /// Select a trajectory, its fiducials and bind every viewer to it
    pub fn select_trajectory(&mut self, id: TrajectoryId) -> Result<()> {
        let index = self.index_of(id)?;
        if self.selected == Some(id) {
            return Ok(());
        }
        let item = &self.trajectories[index];
        self.entries.select(item.entry);
        self.targets.select(item.target);
        for reslicer in &mut self.reslicers {
            reslicer.set_trajectory(&item.ruler);
        }
        self.selected = Some(id);
        self.sync_slice_intersections();
        Ok(())
    }

    /// Delete a trajectory; viewers bound to it become unbound
    pub fn delete_trajectory(&mut self, id: TrajectoryId) -> Result<TrajectoryItem> {
        let index = self.index_of(id)?;
        Ok(self.remove_at(index))
    }

    pub fn clear_trajectories(&mut self) {
        while !self.trajectories.is_empty() {
            self.remove_at(0);
        }
    }

    fn remove_at(&mut self, index: usize) -> TrajectoryItem {
        let item = self.trajectories.remove(index);
        let id = item.id;
        for reslicer in &mut self.reslicers {
            if reslicer.bound().is_some_and(|key| key.id == item.ruler.id()) {
                reslicer.clear_trajectory();
            }
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        log::info!("Deleted trajectory '{}'", item.name());
        item
    }

    /// Point a trajectory at other fiducials and rename it after them
    pub fn update_trajectory(
        &mut self,
        id: TrajectoryId,
        entry: FiducialId,
        target: FiducialId,
    ) -> Result<()> {
        let index = self.index_of(id)?;
        let entry_fiducial = self.fiducial(FiducialKind::Entry, entry)?;
        let target_fiducial = self.fiducial(FiducialKind::Target, target)?;
        let name = format!("{}{}", entry_fiducial.name, target_fiducial.name);
        let (entry_point, target_point) = (entry_fiducial.position, target_fiducial.position);

        let item = &mut self.trajectories[index];
        item.entry = entry;
        item.target = target;
        item.ruler.set_point1(entry_point);
        item.ruler.set_point2(target_point);
        self.rename_at(index, name);
        self.reslice_along(index);
        Ok(())
    }

    /// Rename a trajectory; bound viewers store its state under the new name from now on
    pub fn rename_trajectory<S: Into<String>>(&mut self, id: TrajectoryId, name: S) -> Result<()> {
        let index = self.index_of(id)?;
        self.rename_at(index, name.into());
        Ok(())
    }

    fn rename_at(&mut self, index: usize, name: String) {
        let ruler = &mut self.trajectories[index].ruler;
        log::debug!("Renaming trajectory '{}' to '{}'", ruler.name(), name);
        for reslicer in &mut self.reslicers {
            reslicer.trajectory_renamed(ruler.id(), &name);
        }
        ruler.set_name(name);
    }

    /// Re-apply the plane of every active viewer bound to the trajectory at `index`
    fn reslice_along(&mut self, index: usize) {
        let ruler = &self.trajectories[index].ruler;
        for reslicer in &mut self.reslicers {
            if reslicer.is_active() && reslicer.bound().is_some_and(|key| key.id == ruler.id()) {
                let value = reslicer.params().scalar();
                reslicer.set_value(value, ruler);
            }
        }
    }

    /// Remove a fiducial along with every trajectory using it
    pub fn remove_fiducial(
        &mut self,
        kind: FiducialKind,
        id: FiducialId,
    ) -> Result<Vec<TrajectoryId>> {
        let removed = self
            .fiducials_mut(kind)
            .remove(id)
            .ok_or_else(|| missing_fiducial(kind, id))?;
        let doomed: Vec<TrajectoryId> = self
            .trajectories
            .iter()
            .filter(|t| t.uses(id, kind))
            .map(|t| t.id)
            .collect();
        for trajectory in &doomed {
            self.delete_trajectory(*trajectory)?;
        }
        log::info!(
            "Removed {} '{}' and {} trajectories using it",
            kind,
            removed.name,
            doomed.len()
        );
        self.sync_slice_intersections();
        Ok(doomed)
    }

    pub fn remove_entry(&mut self, id: FiducialId) -> Result<Vec<TrajectoryId>> {
        self.remove_fiducial(FiducialKind::Entry, id)
    }

    pub fn remove_target(&mut self, id: FiducialId) -> Result<Vec<TrajectoryId>> {
        self.remove_fiducial(FiducialKind::Target, id)
    }

    /// Move a fiducial and every ruler end attached to it
    pub fn move_fiducial(
        &mut self,
        kind: FiducialKind,
        id: FiducialId,
        position: Point3d,
    ) -> Result<()> {
        self.fiducials_mut(kind)
            .get_mut(id)
            .ok_or_else(|| missing_fiducial(kind, id))?
            .position = position;

        let attached: Vec<usize> = self
            .trajectories
            .iter()
            .enumerate()
            .filter(|(_, t)| t.uses(id, kind))
            .map(|(index, _)| index)
            .collect();
        for index in attached {
            let ruler = &mut self.trajectories[index].ruler;
            match kind {
                FiducialKind::Entry => ruler.set_point1(position),
                FiducialKind::Target => ruler.set_point2(position),
            }
            self.reslice_along(index);
        }
        Ok(())
    }

    pub fn move_entry(&mut self, id: FiducialId, position: Point3d) -> Result<()> {
        self.move_fiducial(FiducialKind::Entry, id, position)
    }

    pub fn move_target(&mut self, id: FiducialId, position: Point3d) -> Result<()> {
        self.move_fiducial(FiducialKind::Target, id, position)
    }

    /// Move a ruler's ends, carrying its entry and target fiducials along
    pub fn move_ruler(&mut self, id: TrajectoryId, point1: Point3d, point2: Point3d) -> Result<()> {
        let index = self.index_of(id)?;
        let (entry, target) = (self.trajectories[index].entry, self.trajectories[index].target);
        self.move_fiducial(FiducialKind::Entry, entry, point1)?;
        self.move_fiducial(FiducialKind::Target, target, point2)
    }

    /// Edit a fiducial's coordinates from table cells, see
    /// [`FiducialList::set_coordinates_from_text`]
    pub fn edit_fiducial_coordinates(
        &mut self,
        kind: FiducialKind,
        id: FiducialId,
        cells: [&str; 3],
    ) -> Result<()> {
        let list = self.fiducials_mut(kind);
        if !list.contains(id) {
            return Err(missing_fiducial(kind, id));
        }
        let moved = list.set_coordinates_from_text(id, cells);
        let position = list.get(id).map(|f| f.position);
        match (moved, position) {
            (true, Some(position)) => self.move_fiducial(kind, id, position),
            _ => Ok(()),
        }
    }

    /// Show or hide a fiducial in every trajectory that shares it
    pub fn set_fiducial_visibility(
        &mut self,
        kind: FiducialKind,
        id: FiducialId,
        on: bool,
    ) -> Result<()> {
        self.fiducials_mut(kind)
            .get_mut(id)
            .ok_or_else(|| missing_fiducial(kind, id))?
            .visible = on;
        for item in self.trajectories.iter_mut().filter(|t| t.uses(id, kind)) {
            item.display.set_endpoint(kind, on);
        }
        Ok(())
    }

    pub fn set_entry_visibility(&mut self, id: FiducialId, on: bool) -> Result<()> {
        self.set_fiducial_visibility(FiducialKind::Entry, id, on)
    }

    pub fn set_target_visibility(&mut self, id: FiducialId, on: bool) -> Result<()> {
        self.set_fiducial_visibility(FiducialKind::Target, id, on)
    }

    /// Project a fiducial onto slice views in every trajectory that shares it
    pub fn set_fiducial_projection(
        &mut self,
        kind: FiducialKind,
        id: FiducialId,
        on: bool,
    ) -> Result<()> {
        self.fiducials_mut(kind)
            .get_mut(id)
            .ok_or_else(|| missing_fiducial(kind, id))?
            .projection = on;
        for item in self.trajectories.iter_mut().filter(|t| t.uses(id, kind)) {
            item.projection.set_endpoint(kind, on);
        }
        Ok(())
    }

    pub fn set_entry_projection(&mut self, id: FiducialId, on: bool) -> Result<()> {
        self.set_fiducial_projection(FiducialKind::Entry, id, on)
    }

    pub fn set_target_projection(&mut self, id: FiducialId, on: bool) -> Result<()> {
        self.set_fiducial_projection(FiducialKind::Target, id, on)
    }

    pub fn set_path_visibility(&mut self, id: TrajectoryId, on: bool) -> Result<()> {
        let index = self.index_of(id)?;
        let item = &mut self.trajectories[index];
        item.display.path = on;
        item.ruler.visible = on;
        Ok(())
    }

    pub fn set_path_projection(&mut self, id: TrajectoryId, on: bool) -> Result<()> {
        let index = self.index_of(id)?;
        let item = &mut self.trajectories[index];
        item.projection.path = on;
        item.ruler.projection = on;
        Ok(())
    }

    /// Whether the selected trajectory could be pointed at `entry` and `target`
    pub fn can_update(&self, entry: FiducialId, target: FiducialId) -> bool {
        self.selected_trajectory()
            .is_some_and(|item| !item.joins(entry, target))
    }

    /// Run `f` on a viewer's controller with the ruler it is bound to.
    ///
    /// Does nothing when the viewer is unknown or has no bound trajectory.
    fn with_bound_ruler<F>(&mut self, viewer: &str, f: F)
    where
        F: FnOnce(&mut ResliceController<V>, &Ruler),
    {
        let Some(reslicer) = self.reslicers.iter_mut().find(|r| r.viewer().name() == viewer) else {
            log::debug!("No viewer named '{}'", viewer);
            return;
        };
        let ruler = reslicer
            .bound()
            .and_then(|key| self.trajectories.iter().find(|t| t.ruler.id() == key.id))
            .map(|t| &t.ruler);
        match ruler {
            Some(ruler) => f(reslicer, ruler),
            None => log::debug!("Viewer '{}' has no trajectory", viewer),
        }
        self.sync_slice_intersections();
    }

    pub fn toggle_reslicing(&mut self, viewer: &str, on: bool) {
        self.with_bound_ruler(viewer, |reslicer, ruler| reslicer.set_reslicing(on, ruler));
    }

    pub fn set_reslice_value(&mut self, viewer: &str, value: f64) {
        self.with_bound_ruler(viewer, |reslicer, ruler| reslicer.set_value(value, ruler));
    }

    pub fn set_reslice_mode(&mut self, viewer: &str, mode: ResliceMode) {
        self.with_bound_ruler(viewer, |reslicer, ruler| reslicer.set_mode(mode, ruler));
    }

    /// Control bar of a viewer, `None` for an unknown viewer
    pub fn panel(&self, viewer: &str) -> Option<ReslicePanel> {
        let reslicer = self.reslicer(viewer)?;
        let ruler = reslicer
            .bound()
            .and_then(|key| self.trajectories.iter().find(|t| t.ruler.id() == key.id))
            .map(|t| &t.ruler as &dyn TrajectoryLine);
        Some(reslicer.panel(ruler))
    }

    /// Preview a trajectory in `viewer` using the trajectory's own parameters.
    ///
    /// The viewer's reslicing controls are bypassed. The angle is checked
    /// against the configured range. The no-viewer label only records the
    /// parameters.
    pub fn preview_trajectory(
        &mut self,
        id: TrajectoryId,
        viewer: &str,
        params: ResliceParameters,
    ) -> Result<()> {
        let index = self.index_of(id)?;
        let item = &mut self.trajectories[index];
        item.reslice_viewer = viewer.to_string();
        item.reslice = params.with_angle(params.angle(), self.config.reslicing.angle_range);
        if viewer == self.config.no_viewer_label {
            return Ok(());
        }

        let reslicer = self
            .reslicers
            .iter_mut()
            .find(|r| r.viewer().name() == viewer)
            .ok_or_else(|| Error::InvalidData(format!("no viewer named '{}'", viewer)))?;
        reslice_viewer(reslicer.viewer_mut(), &item.ruler, &item.reslice)?;
        Ok(())
    }

    /// Recompute every ruler's slice-intersection flag from the viewers
    fn sync_slice_intersections(&mut self) {
        for item in &mut self.trajectories {
            let visible = self
                .reslicers
                .iter()
                .any(|r| r.slice_intersection_visible(item.ruler.id()));
            item.ruler.slice_intersection_visible = visible;
        }
    }
}

impl<V: Viewer> Default for PathPlan<V> {
    fn default() -> Self {
        Self::new(PlanConfig::default())
    }
}

fn missing_fiducial(kind: FiducialKind, id: FiducialId) -> Error {
    Error::MissingFiducial(format!("{} {}", kind, id))
}
