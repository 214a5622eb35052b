pub mod formatter;

pub use formatter::{
    format_component_detail, format_radar, format_ranked_table, format_score, format_sensitivity,
    format_tornado, format_violations, should_use_colors,
};
