//! Test modules for trajslice-planning
//!
//! End-to-end planning sessions: building trajectories from fiducials,
//! reslicing viewers along them and editing the plan while viewers are bound.
