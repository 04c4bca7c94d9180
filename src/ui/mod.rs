/// Desktop UI widgets

pub mod floor_plan;
