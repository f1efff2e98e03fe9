#![cfg(feature = "plotters-backend")]

use dashboard_rs::DashboardError;
use dashboard_rs::chart::{
    ChartData, ChartKind, ChartView, ChartViewConfig, Dataset, SvgRenderer,
};

fn hours_by_month() -> ChartData {
    ChartData::new(
        vec!["ene".into(), "feb".into(), "mar".into(), "abr".into()],
        vec![Dataset::new("horas", vec![10.0, 14.0, 9.0, 16.5])],
    )
}

fn mounted(config: ChartViewConfig) -> ChartView<SvgRenderer> {
    let mut view = ChartView::new(SvgRenderer, config).expect("view must build");
    view.mount().expect("mount must succeed");
    view
}

#[test]
fn the_document_is_empty_until_mount() {
    let view = ChartView::new(SvgRenderer, ChartViewConfig::new(hours_by_month()))
        .expect("view must build");
    assert!(view.svg().is_empty());
    assert!(!view.surface().is_rendered());
}

#[test]
fn line_charts_render_a_responsive_document() {
    let view = mounted(ChartViewConfig::new(hours_by_month()));
    let svg = view.svg();
    assert!(svg.starts_with("<svg width=\"100%\" height=\"100%\""));
    assert!(svg.contains("viewBox=\"0 0 640 480\""));
    assert!(svg.contains("preserveAspectRatio=\"none\""));
    assert!(svg.contains("xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.contains("<polyline"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn the_surface_size_drives_the_view_box() {
    let config = ChartViewConfig::new(hours_by_month())
        .with_kind(ChartKind::Bar)
        .with_surface_size(800, 400);
    let view = mounted(config);
    assert!(view.svg().contains("viewBox=\"0 0 800 400\""));
}

#[test]
fn bar_charts_render_columns() {
    let view = mounted(ChartViewConfig::new(hours_by_month()).with_kind(ChartKind::Bar));
    assert!(view.svg().contains("<rect"));
}

#[test]
fn pie_charts_render_palette_colored_sectors() {
    let view = mounted(ChartViewConfig::new(hours_by_month()).with_kind(ChartKind::Pie));
    let lowered = view.svg().to_ascii_lowercase();
    assert!(lowered.contains("<polygon"));
    // first slice takes the first fallback palette entry
    assert!(lowered.contains("#36a2eb"));
    // slice labels are drawn next to the sectors
    assert!(lowered.contains("ene"));
}

#[test]
fn doughnut_and_pie_documents_differ() {
    let pie = mounted(ChartViewConfig::new(hours_by_month()).with_kind(ChartKind::Pie));
    let doughnut = mounted(ChartViewConfig::new(hours_by_month()).with_kind(ChartKind::Doughnut));
    assert_ne!(pie.svg(), doughnut.svg());
}

#[test]
fn explicit_dataset_colors_land_in_the_document() {
    let data = ChartData::new(
        vec!["ene".into(), "feb".into()],
        vec![Dataset::new("horas", vec![3.0, 5.0]).with_border_color("#8e44ad")],
    );
    let view = mounted(ChartViewConfig::new(data));
    assert!(view.svg().to_ascii_lowercase().contains("#8e44ad"));
}

#[test]
fn updating_replaces_the_rendered_document() {
    let mut view = ChartView::new(SvgRenderer, ChartViewConfig::new(hours_by_month()))
        .expect("view must build");
    view.mount().expect("mount must succeed");
    let before = view.svg().to_owned();

    let next = ChartData::new(
        vec!["may".into(), "jun".into()],
        vec![Dataset::new("horas", vec![2.0, 11.0])],
    );
    view.update(next).expect("update must succeed");
    let after = view.svg();
    assert!(!after.is_empty());
    assert_ne!(before, after);
}

#[test]
fn each_view_renders_into_its_own_document() {
    let first = mounted(ChartViewConfig::new(hours_by_month()));
    let second_data = ChartData::new(
        vec!["jul".into(), "ago".into()],
        vec![Dataset::new("tareas", vec![1.0, 4.0])],
    );
    let second = mounted(ChartViewConfig::new(second_data));
    assert!(!first.svg().is_empty());
    assert!(!second.svg().is_empty());
    assert_ne!(first.svg(), second.svg());
}

#[test]
fn negative_sector_values_are_rejected() {
    let data = ChartData::new(
        vec!["ene".into(), "feb".into()],
        vec![Dataset::new("horas", vec![5.0, -2.0])],
    );
    let mut view = ChartView::new(SvgRenderer, ChartViewConfig::new(data).with_kind(ChartKind::Pie))
        .expect("view must build");
    let err = view.mount().expect_err("negative sector values must fail");
    assert!(matches!(err, DashboardError::InvalidData(_)));
    // a failed pass leaves no partial document behind
    assert!(view.svg().is_empty());
    assert!(!view.surface().is_rendered());
}

#[test]
fn multi_dataset_line_charts_draw_every_series() {
    let data = ChartData::new(
        vec!["ene".into(), "feb".into(), "mar".into()],
        vec![
            Dataset::new("horas", vec![10.0, 14.0, 9.0]),
            Dataset::new("tareas", vec![3.0, 2.0, 6.0]),
        ],
    );
    let view = mounted(ChartViewConfig::new(data));
    let lowered = view.svg().to_ascii_lowercase();
    // one palette stroke per series
    assert!(lowered.contains("#36a2eb"));
    assert!(lowered.contains("#ff6384"));
}
