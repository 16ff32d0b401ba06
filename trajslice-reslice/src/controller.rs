//! Per-viewer reslicing state machine
//!
//! Each viewer has one [`ResliceController`]. It moves between three states:
//!
//! - `Idle`: no trajectory bound, every event except binding is ignored.
//! - `Bound`: a trajectory is bound and its saved parameters loaded; the
//!   viewer is not driven.
//! - `Active`: reslicing is switched on and every parameter change re-orients
//!   the viewer.
//!
//! [`transition`] is a pure function from (state, event) to the next state
//! and a list of [`Effect`]s; the controller applies those effects in one
//! place. Parameters are written back to the viewer only when the bound
//! trajectory changes.

use crate::config::ReslicingConfig;
use crate::params::{AngleRange, ResliceMode, ResliceParameters};
use crate::solver::reslice_viewer;
use crate::state::ResliceStateStore;
use trajslice_core::{TrajectoryLine, Viewer};

/// State of one viewer's reslicing controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResliceState {
    #[default]
    Idle,
    Bound,
    Active,
}

/// Identity of a bound trajectory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrajectoryKey {
    pub id: String,
    pub name: String,
}

impl TrajectoryKey {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn of<L: TrajectoryLine + ?Sized>(line: &L) -> Self {
        Self::new(line.id(), line.name())
    }
}

/// Input to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum ResliceEvent {
    /// Bind a trajectory, replacing any bound one
    SetTrajectory(TrajectoryKey),
    /// Drop the bound trajectory
    ClearTrajectory,
    /// Reslicing switched on or off
    Toggle(bool),
    /// Position or angle slider moved
    ValueChanged(f64),
    /// Perpendicular / transverse switch changed
    ModeChanged(ResliceMode),
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Persist the current parameters under the bound trajectory
    SaveOutgoing,
    Bind(TrajectoryKey),
    /// Forget the bound trajectory and reset parameters
    Unbind,
    /// Replace the current parameters with the bound trajectory's saved ones
    LoadIncoming,
    /// Record the bound trajectory as the viewer's driver
    MarkDriving,
    SetValue(f64),
    SetMode(ResliceMode),
    /// Recompute the plane and apply it to the viewer
    Reslice,
}

/// Compute the next state and the effects of `event` in `state`
pub fn transition(state: ResliceState, event: &ResliceEvent) -> (ResliceState, Vec<Effect>) {
    use ResliceEvent as E;
    use ResliceState as S;

    match (state, event) {
        (S::Idle, E::SetTrajectory(key)) => {
            (S::Bound, vec![Effect::Bind(key.clone()), Effect::LoadIncoming])
        }
        (S::Bound | S::Active, E::SetTrajectory(key)) => (
            S::Bound,
            vec![Effect::SaveOutgoing, Effect::Bind(key.clone()), Effect::LoadIncoming],
        ),
        (S::Bound | S::Active, E::ClearTrajectory) => {
            (S::Idle, vec![Effect::SaveOutgoing, Effect::Unbind])
        }
        (S::Idle, _) => (S::Idle, Vec::new()),

        (S::Bound, E::Toggle(true)) => (S::Active, vec![Effect::MarkDriving, Effect::Reslice]),
        (S::Active, E::Toggle(false)) => (S::Bound, Vec::new()),
        (S::Bound, E::Toggle(false)) | (S::Active, E::Toggle(true)) => (state, Vec::new()),

        (S::Bound, E::ValueChanged(value)) => (S::Bound, vec![Effect::SetValue(*value)]),
        (S::Active, E::ValueChanged(value)) => {
            (S::Active, vec![Effect::SetValue(*value), Effect::Reslice])
        }
        (S::Bound, E::ModeChanged(mode)) => (S::Bound, vec![Effect::SetMode(*mode)]),
        (S::Active, E::ModeChanged(mode)) => {
            (S::Active, vec![Effect::SetMode(*mode), Effect::Reslice])
        }
    }
}

/// Reslicing controls of one viewer
#[derive(Debug, Clone)]
pub struct ResliceController<V> {
    viewer: V,
    store: ResliceStateStore,
    angle_range: AngleRange,
    highlight_color: String,
    state: ResliceState,
    bound: Option<TrajectoryKey>,
    params: ResliceParameters,
}

impl<V: Viewer> ResliceController<V> {
    pub fn new(viewer: V, config: &ReslicingConfig) -> Self {
        Self {
            viewer,
            store: ResliceStateStore::from_config(config),
            angle_range: config.angle_range,
            highlight_color: config.highlight_color.clone(),
            state: ResliceState::Idle,
            bound: None,
            params: ResliceParameters::new(),
        }
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut V {
        &mut self.viewer
    }

    pub fn into_viewer(self) -> V {
        self.viewer
    }

    pub fn state(&self) -> ResliceState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ResliceState::Active
    }

    /// In-memory parameters of the bound trajectory
    pub fn params(&self) -> &ResliceParameters {
        &self.params
    }

    pub fn bound(&self) -> Option<&TrajectoryKey> {
        self.bound.as_ref()
    }

    pub fn store(&self) -> &ResliceStateStore {
        &self.store
    }

    pub(crate) fn angle_range(&self) -> AngleRange {
        self.angle_range
    }

    pub(crate) fn highlight_color(&self) -> &str {
        &self.highlight_color
    }

    /// Bind `line`, saving the outgoing trajectory's parameters first.
    ///
    /// Reslicing is always switched off by a rebind.
    pub fn set_trajectory<L: TrajectoryLine + ?Sized>(&mut self, line: &L) {
        self.dispatch(ResliceEvent::SetTrajectory(TrajectoryKey::of(line)), None::<&L>);
    }

    /// Unbind the current trajectory, saving its parameters
    pub fn clear_trajectory(&mut self) {
        self.dispatch::<dyn TrajectoryLine>(ResliceEvent::ClearTrajectory, None);
    }

    /// Switch reslicing along the bound trajectory on or off
    pub fn set_reslicing<L: TrajectoryLine + ?Sized>(&mut self, on: bool, line: &L) {
        self.dispatch(ResliceEvent::Toggle(on), Some(line));
    }

    /// Set the position (perpendicular) or angle (transverse) value
    pub fn set_value<L: TrajectoryLine + ?Sized>(&mut self, value: f64, line: &L) {
        self.dispatch(ResliceEvent::ValueChanged(value), Some(line));
    }

    pub fn set_mode<L: TrajectoryLine + ?Sized>(&mut self, mode: ResliceMode, line: &L) {
        self.dispatch(ResliceEvent::ModeChanged(mode), Some(line));
    }

    /// Follow a rename of the bound trajectory so later saves use the new name
    pub fn trajectory_renamed(&mut self, id: &str, new_name: &str) {
        if let Some(key) = self.bound.as_mut().filter(|key| key.id == id) {
            key.name = new_name.to_string();
        }
    }

    /// Whether this viewer's plane currently cuts across trajectory `id`
    pub fn slice_intersection_visible(&self, id: &str) -> bool {
        self.is_active()
            && self.params.mode().is_perpendicular()
            && self.bound.as_ref().is_some_and(|key| key.id == id)
    }

    fn dispatch<L: TrajectoryLine + ?Sized>(&mut self, event: ResliceEvent, line: Option<&L>) {
        let binding = matches!(
            event,
            ResliceEvent::SetTrajectory(_) | ResliceEvent::ClearTrajectory
        );
        if !binding {
            let matches_bound = match (line, &self.bound) {
                (Some(line), Some(key)) => line.id() == key.id,
                _ => false,
            };
            if !matches_bound {
                log::debug!(
                    "Viewer '{}' ignored {:?}: trajectory is not the bound one",
                    self.viewer.name(),
                    event
                );
                return;
            }
        }

        let (next, effects) = transition(self.state, &event);
        log::debug!(
            "Viewer '{}': {:?} --{:?}--> {:?}",
            self.viewer.name(),
            self.state,
            event,
            next
        );
        self.state = next;
        self.apply(effects, line);
    }

    fn apply<L: TrajectoryLine + ?Sized>(&mut self, effects: Vec<Effect>, line: Option<&L>) {
        for effect in effects {
            match effect {
                Effect::SaveOutgoing => {
                    if let Some(key) = &self.bound {
                        self.store.save_state(&key.name, &mut self.viewer, &self.params);
                    }
                }
                Effect::Bind(key) => self.bound = Some(key),
                Effect::Unbind => {
                    self.bound = None;
                    self.params = ResliceParameters::new();
                }
                Effect::LoadIncoming => {
                    if let Some(key) = &self.bound {
                        self.params = self.store.load_state(&key.name, &self.viewer);
                    }
                }
                Effect::MarkDriving => {
                    if let Some(key) = &self.bound {
                        self.store.mark_driving(&mut self.viewer, &key.id, &key.name);
                    }
                }
                Effect::SetValue(value) => self.params.set_scalar(value, self.angle_range),
                Effect::SetMode(mode) => self.params.set_mode(mode),
                Effect::Reslice => {
                    if let Some(line) = line {
                        if let Err(e) = reslice_viewer(&mut self.viewer, line, &self.params) {
                            log::warn!(
                                "Cannot reslice viewer '{}' along '{}': {}",
                                self.viewer.name(),
                                line.name(),
                                e
                            );
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use trajslice_core::{Point3d, SliceViewer, Vector3d};

    struct Line {
        id: String,
        name: String,
        p1: Point3d,
        p2: Point3d,
    }

    impl Line {
        fn new(id: &str, name: &str, p1: Point3d, p2: Point3d) -> Self {
            Self {
                id: id.to_string(),
                name: name.to_string(),
                p1,
                p2,
            }
        }
    }

    impl TrajectoryLine for Line {
        fn id(&self) -> &str {
            &self.id
        }
        fn name(&self) -> &str {
            &self.name
        }
        fn point1(&self) -> Point3d {
            self.p1
        }
        fn point2(&self) -> Point3d {
            self.p2
        }
    }

    fn z_line(id: &str, name: &str) -> Line {
        Line::new(id, name, Point3d::origin(), Point3d::new(0.0, 0.0, 10.0))
    }

    fn controller() -> ResliceController<SliceViewer> {
        ResliceController::new(SliceViewer::new("Red"), &ReslicingConfig::default())
    }

    #[test]
    fn test_transition_table() {
        let key = TrajectoryKey::new("1", "T1");
        let bind = ResliceEvent::SetTrajectory(key.clone());

        assert_eq!(
            transition(ResliceState::Idle, &bind),
            (ResliceState::Bound, vec![Effect::Bind(key.clone()), Effect::LoadIncoming])
        );
        assert_eq!(
            transition(ResliceState::Active, &bind),
            (
                ResliceState::Bound,
                vec![Effect::SaveOutgoing, Effect::Bind(key), Effect::LoadIncoming]
            )
        );
        assert_eq!(
            transition(ResliceState::Idle, &ResliceEvent::Toggle(true)),
            (ResliceState::Idle, vec![])
        );
        assert_eq!(
            transition(ResliceState::Bound, &ResliceEvent::Toggle(true)),
            (ResliceState::Active, vec![Effect::MarkDriving, Effect::Reslice])
        );
        assert_eq!(
            transition(ResliceState::Active, &ResliceEvent::Toggle(false)),
            (ResliceState::Bound, vec![])
        );
        assert_eq!(
            transition(ResliceState::Bound, &ResliceEvent::ValueChanged(3.0)),
            (ResliceState::Bound, vec![Effect::SetValue(3.0)])
        );
        assert_eq!(
            transition(ResliceState::Active, &ResliceEvent::ModeChanged(ResliceMode::Transverse)),
            (
                ResliceState::Active,
                vec![Effect::SetMode(ResliceMode::Transverse), Effect::Reslice]
            )
        );
        assert_eq!(
            transition(ResliceState::Bound, &ResliceEvent::ClearTrajectory),
            (ResliceState::Idle, vec![Effect::SaveOutgoing, Effect::Unbind])
        );
    }

    #[test]
    fn test_bind_loads_without_reslicing() {
        let mut c = controller();
        let line = z_line("1", "T1");
        c.viewer_mut().set_attribute("PathXplorer.T1_Red_Position", "40");

        c.set_trajectory(&line);
        assert_eq!(c.state(), ResliceState::Bound);
        assert_eq!(c.params().position(), 40.0);
        assert_eq!(c.viewer().orientation_updates, 0);
    }

    #[test]
    fn test_fresh_viewer_loads_defaults() {
        let mut c = controller();
        c.set_trajectory(&z_line("1", "T1"));
        assert_eq!(c.params(), &ResliceParameters::new());
    }

    #[test]
    fn test_activation_marks_driving_and_reslices() {
        let mut c = controller();
        let line = z_line("ruler-1", "T1");
        c.set_trajectory(&line);
        c.set_value(50.0, &line);
        c.set_reslicing(true, &line);

        assert_eq!(c.state(), ResliceState::Active);
        assert_eq!(c.store().driving_id(c.viewer()).as_deref(), Some("ruler-1"));
        assert_eq!(c.store().driving_name(c.viewer()).as_deref(), Some("T1"));
        assert_relative_eq!(
            c.viewer().orientation().origin,
            Point3d::new(0.0, 0.0, 5.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(c.viewer().orientation().normal, Vector3d::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_parameter_changes_reslice_only_when_active() {
        let mut c = controller();
        let line = z_line("1", "T1");
        c.set_trajectory(&line);

        c.set_value(20.0, &line);
        assert_eq!(c.viewer().orientation_updates, 0);

        c.set_reslicing(true, &line);
        assert_eq!(c.viewer().orientation_updates, 1);
        c.set_value(80.0, &line);
        assert_eq!(c.viewer().orientation_updates, 2);
        assert_relative_eq!(c.viewer().orientation().origin.z, 8.0, epsilon = 1e-12);

        c.set_mode(ResliceMode::Transverse, &line);
        assert_eq!(c.viewer().orientation_updates, 3);
        assert_relative_eq!(c.viewer().orientation().origin, line.p2);

        // Edits are not persisted until the next rebind
        assert_eq!(c.viewer().attribute("PathXplorer.T1_Red_Position"), None);
    }

    #[test]
    fn test_toggle_off_keeps_driving_record() {
        let mut c = controller();
        let line = z_line("1", "T1");
        c.set_trajectory(&line);
        c.set_reslicing(true, &line);
        c.set_reslicing(false, &line);

        assert_eq!(c.state(), ResliceState::Bound);
        assert!(c.store().is_driving(c.viewer(), "1"));

        c.set_value(60.0, &line);
        assert_eq!(c.viewer().orientation_updates, 1);
    }

    #[test]
    fn test_switch_saves_outgoing_before_loading_incoming() {
        let mut c = controller();
        let t1 = z_line("1", "T1");
        let t2 = Line::new("2", "T2", Point3d::origin(), Point3d::new(10.0, 0.0, 0.0));
        c.viewer_mut().set_attribute("PathXplorer.T2_Red_Position", "75");

        c.set_trajectory(&t1);
        c.set_reslicing(true, &t1);
        c.set_value(30.0, &t1);

        c.set_trajectory(&t2);
        assert_eq!(c.viewer().attribute("PathXplorer.T1_Red_Position").as_deref(), Some("30"));
        assert_eq!(c.viewer().attribute("PathXplorer.T1_Red_Perpendicular").as_deref(), Some("ON"));
        assert_eq!(c.params().position(), 75.0);
        assert_eq!(c.state(), ResliceState::Bound);
        assert_eq!(c.bound().map(|k| k.name.as_str()), Some("T2"));

        c.set_trajectory(&t1);
        assert_eq!(c.params().position(), 30.0);
        assert_eq!(c.viewer().attribute("PathXplorer.T2_Red_Position").as_deref(), Some("75"));
    }

    #[test]
    fn test_events_for_other_trajectory_are_ignored() {
        let mut c = controller();
        let t1 = z_line("1", "T1");
        let t2 = z_line("2", "T2");

        c.set_reslicing(true, &t1);
        assert_eq!(c.state(), ResliceState::Idle);

        c.set_trajectory(&t1);
        c.set_reslicing(true, &t2);
        c.set_value(90.0, &t2);
        assert_eq!(c.state(), ResliceState::Bound);
        assert_eq!(c.params().position(), 0.0);
    }

    #[test]
    fn test_degenerate_line_keeps_viewer() {
        let mut c = controller();
        let p = Point3d::new(1.0, 2.0, 3.0);
        let line = Line::new("1", "T1", p, p);

        c.set_trajectory(&line);
        c.set_reslicing(true, &line);
        assert_eq!(c.state(), ResliceState::Active);
        assert_eq!(c.viewer().orientation_updates, 0);
    }

    #[test]
    fn test_rename_rekeys_next_save() {
        let mut c = controller();
        let t1 = z_line("1", "Old");
        let t2 = z_line("2", "Other");
        c.set_trajectory(&t1);
        c.set_value(10.0, &t1);

        c.trajectory_renamed("1", "New");
        c.trajectory_renamed("9", "Ignored");
        c.set_trajectory(&t2);

        assert_eq!(c.viewer().attribute("PathXplorer.New_Red_Position").as_deref(), Some("10"));
        assert_eq!(c.viewer().attribute("PathXplorer.Old_Red_Position"), None);
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let mut c = controller();
        let line = z_line("1", "T1");
        c.set_trajectory(&line);
        c.set_value(45.0, &line);
        c.clear_trajectory();

        assert_eq!(c.state(), ResliceState::Idle);
        assert!(c.bound().is_none());
        assert_eq!(c.params(), &ResliceParameters::new());
        assert_eq!(c.viewer().attribute("PathXplorer.T1_Red_Position").as_deref(), Some("45"));
    }

    #[test]
    fn test_slice_intersection_visibility() {
        let mut c = controller();
        let line = z_line("1", "T1");
        c.set_trajectory(&line);
        assert!(!c.slice_intersection_visible("1"));

        c.set_reslicing(true, &line);
        assert!(c.slice_intersection_visible("1"));
        assert!(!c.slice_intersection_visible("2"));

        c.set_mode(ResliceMode::Transverse, &line);
        assert!(!c.slice_intersection_visible("1"));
    }

    #[test]
    fn test_signed_angle_range() {
        let config = ReslicingConfig::default().with_angle_range(AngleRange::Signed);
        let mut c = ResliceController::new(SliceViewer::new("Red"), &config);
        let line = z_line("1", "T1");
        c.set_trajectory(&line);
        c.set_reslicing(true, &line);
        c.set_mode(ResliceMode::Transverse, &line);

        c.set_value(-90.0, &line);
        assert_eq!(c.params().angle(), -90.0);
        assert_relative_eq!(c.viewer().orientation().origin, line.p2);

        c.set_value(270.0, &line);
        assert_eq!(c.params().angle(), 0.0);

        c.set_value(-45.0, &line);
        c.set_trajectory(&z_line("2", "T2"));
        c.set_trajectory(&line);
        assert_eq!(c.params().angle(), -45.0);
        assert_eq!(c.panel(Some(&line)).slider_range, (-180.0, 180.0));
    }
}
