//! End-to-end scenarios across the solvers and the frame glue

mod reflection_scenarios;
