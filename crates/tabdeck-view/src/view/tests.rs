use tabdeck_common::{HostError, MoveIndex, TabDeckError, TabId, Window, WindowId};
use tabdeck_config::PopupConfig;

use super::TabListView;
use crate::gesture::Gesture;
use crate::host::{HostCompletion, HostRequest, MemoryHost};
use crate::surface::{Highlight, MemorySurface, Removal, Surface};

// =============================================================================
// HELPERS
// =============================================================================

fn snapshot(layout: &[(i32, &[i32])]) -> Vec<Window> {
    MemoryHost::from_layout(layout).windows()
}

/// A view rendered from `layout`, with the request queue drained.
fn rendered(layout: &[(i32, &[i32])]) -> TabListView<MemorySurface> {
    rendered_with(layout, PopupConfig::default())
}

fn rendered_with(layout: &[(i32, &[i32])], config: PopupConfig) -> TabListView<MemorySurface> {
    let mut view = TabListView::new(MemorySurface::new(), &config);
    view.render().unwrap();
    assert_eq!(view.take_requests(), vec![HostRequest::Enumerate]);
    view.complete(HostCompletion::Windows(Ok(snapshot(layout))))
        .unwrap();
    view
}

fn drag(view: &mut TabListView<MemorySurface>, gestures: &[Gesture]) {
    for g in gestures {
        view.handle(*g).unwrap();
    }
}

fn moves(requests: &[HostRequest]) -> Vec<HostRequest> {
    requests
        .iter()
        .copied()
        .filter(|r| matches!(r, HostRequest::Move { .. }))
        .collect()
}

// =============================================================================
// RENDER
// =============================================================================

#[test]
fn one_header_and_row_per_tab_in_host_order() {
    let view = rendered(&[(1, &[10, 11]), (2, &[20])]);
    assert_eq!(
        view.surface().outline(),
        vec!["Window 1", "  10 Tab 10", "  11 Tab 11", "Window 2", "  20 Tab 20"]
    );
}

#[test]
fn empty_window_has_no_header_but_keeps_position() {
    let view = rendered(&[(1, &[10]), (2, &[]), (3, &[30])]);
    assert_eq!(
        view.surface().outline(),
        vec!["Window 1", "  10 Tab 10", "Window 3", "  30 Tab 30"]
    );
    assert!(view
        .surface()
        .headers()
        .iter()
        .all(|h| h.window_id != WindowId(2)));
}

#[test]
fn rows_carry_attributes_and_row_config() {
    let mut config = PopupConfig::default();
    config.view.icon_size_px = 24;
    config.view.close_label = "×".into();
    let view = rendered_with(&[(1, &[10, 11])], config);

    let rows = view.surface().rows();
    assert_eq!(rows[1].index, 1);
    assert_eq!(rows[1].window_id, WindowId(1));
    assert_eq!(rows[1].icon_size_px, 24);
    assert_eq!(rows[1].close_label, "×");
    assert!(rows[0].active);
    assert!(!rows[1].active);
}

#[test]
fn title_falls_back_to_url_and_icon_passes_through() {
    let mut windows = snapshot(&[(1, &[10, 11])]);
    windows[0].tabs[0].title.clear();
    windows[0].tabs[1].fav_icon_url = Some("https://example.com/11.ico".into());

    let mut view = TabListView::new(MemorySurface::new(), &PopupConfig::default());
    view.complete(HostCompletion::Windows(Ok(windows))).unwrap();

    let rows = view.surface().rows();
    assert_eq!(rows[0].label, "https://example.com/10");
    assert_eq!(rows[0].icon_url, None);
    assert_eq!(rows[1].icon_url.as_deref(), Some("https://example.com/11.ico"));
}

#[test]
fn render_clears_before_host_answers() {
    let mut view = rendered(&[(1, &[10])]);
    view.render().unwrap();
    assert!(view.surface().nodes().is_empty());
    assert_eq!(view.take_requests(), vec![HostRequest::Enumerate]);
}

#[test]
fn rebuild_replaces_previous_output() {
    let mut view = rendered(&[(1, &[10, 11])]);
    view.complete(HostCompletion::Windows(Ok(snapshot(&[(1, &[11])]))))
        .unwrap();
    assert_eq!(view.surface().outline(), vec!["Window 1", "  11 Tab 11"]);
}

#[test]
fn enumerate_failure_is_returned() {
    let mut view = TabListView::new(MemorySurface::new(), &PopupConfig::default());
    let err = view
        .complete(HostCompletion::Windows(Err(HostError::Enumerate(
            "no permission".into(),
        ))))
        .unwrap_err();
    assert!(matches!(err, TabDeckError::Host(HostError::Enumerate(_))));
}

// =============================================================================
// CLICK AND CLOSE
// =============================================================================

#[test]
fn click_focuses_window_then_activates_tab() {
    let mut view = rendered(&[(1, &[10]), (2, &[20, 21])]);
    view.handle(Gesture::Activate(TabId(21))).unwrap();
    assert_eq!(
        view.take_requests(),
        vec![
            HostRequest::FocusWindow(WindowId(2)),
            HostRequest::ActivateTab(TabId(21)),
        ]
    );
    // No re-render until the next full render.
    view.complete(HostCompletion::TabActivated {
        tab_id: TabId(21),
        result: Ok(()),
    })
    .unwrap();
    assert!(!view.has_pending());
}

#[test]
fn close_requests_removal_with_window() {
    let mut view = rendered(&[(1, &[10, 11])]);
    view.handle(Gesture::Close(TabId(11))).unwrap();
    assert_eq!(
        view.take_requests(),
        vec![HostRequest::Remove {
            tab_id: TabId(11),
            window_id: WindowId(1),
        }]
    );
}

#[test]
fn close_patches_row_without_rerender() {
    let mut view = rendered(&[(1, &[10, 11])]);
    view.complete(HostCompletion::Removed {
        tab_id: TabId(10),
        window_id: WindowId(1),
        result: Ok(()),
    })
    .unwrap();
    assert_eq!(view.surface().outline(), vec!["Window 1", "  11 Tab 11"]);
    assert!(!view.has_pending());
    assert_eq!(view.surface().clear_count(), 2);
}

#[test]
fn closing_last_tab_removes_row_then_header() {
    let mut view = rendered(&[(1, &[10]), (2, &[20])]);
    view.complete(HostCompletion::Removed {
        tab_id: TabId(10),
        window_id: WindowId(1),
        result: Ok(()),
    })
    .unwrap();
    assert_eq!(
        view.surface().removals(),
        &[Removal::Row(TabId(10)), Removal::Header(WindowId(1))]
    );
    assert_eq!(view.surface().outline(), vec!["Window 2", "  20 Tab 20"]);
}

#[test]
fn detached_row_is_skipped_on_close() {
    let mut view = rendered(&[(1, &[10, 11])]);
    // Another render wiped the list before the removal came back.
    view.render().unwrap();
    view.complete(HostCompletion::Removed {
        tab_id: TabId(10),
        window_id: WindowId(1),
        result: Ok(()),
    })
    .unwrap();
    assert!(view
        .surface()
        .removals()
        .iter()
        .all(|r| *r != Removal::Row(TabId(10))));
}

#[test]
fn failed_remove_still_patches() {
    let mut view = rendered(&[(1, &[10, 11])]);
    view.complete(HostCompletion::Removed {
        tab_id: TabId(10),
        window_id: WindowId(1),
        result: Err(HostError::Remove("No tab with id: 10.".into())),
    })
    .unwrap();
    assert_eq!(view.surface().row_ids(WindowId(1)), vec![TabId(11)]);
}

// =============================================================================
// DRAG AND DROP
// =============================================================================

#[test]
fn drag_start_records_session_and_marks_row() {
    let mut view = rendered(&[(1, &[10, 11])]);
    view.handle(Gesture::DragStart(TabId(11))).unwrap();
    let session = view.drag_session().unwrap();
    assert_eq!(session.tab_id, TabId(11));
    assert_eq!(session.source_window, WindowId(1));
    assert_eq!(session.source_index, 1);
    assert!(view.surface().row_has(TabId(11), Highlight::Dragging));
}

#[test]
fn drag_over_keeps_one_indicator() {
    let mut view = rendered(&[(1, &[10, 11, 12])]);
    drag(
        &mut view,
        &[
            Gesture::DragStart(TabId(10)),
            Gesture::DragOver(Some(TabId(11))),
            Gesture::DragOver(Some(TabId(12))),
        ],
    );
    assert_eq!(view.surface().highlighted(Highlight::DropTarget), 1);
    assert!(view.surface().row_has(TabId(12), Highlight::DropTarget));
    assert_eq!(view.drag_session().unwrap().row_indicator, Some(TabId(12)));
}

#[test]
fn drag_over_self_or_empty_clears_indicator() {
    let mut view = rendered(&[(1, &[10, 11])]);
    drag(
        &mut view,
        &[Gesture::DragStart(TabId(10)), Gesture::DragOver(Some(TabId(11)))],
    );
    view.handle(Gesture::DragOver(Some(TabId(10)))).unwrap();
    assert_eq!(view.surface().highlighted(Highlight::DropTarget), 0);

    view.handle(Gesture::DragOver(Some(TabId(11)))).unwrap();
    view.handle(Gesture::DragOver(None)).unwrap();
    assert_eq!(view.surface().highlighted(Highlight::DropTarget), 0);
    assert_eq!(view.drag_session().unwrap().row_indicator, None);
}

#[test]
fn drag_leave_clears_indicated_row() {
    let mut view = rendered(&[(1, &[10, 11])]);
    drag(
        &mut view,
        &[
            Gesture::DragStart(TabId(10)),
            Gesture::DragOver(Some(TabId(11))),
            Gesture::DragLeave(TabId(11)),
        ],
    );
    assert!(!view.surface().row_has(TabId(11), Highlight::DropTarget));
    assert_eq!(view.drag_session().unwrap().row_indicator, None);
}

#[test]
fn drop_on_self_is_noop() {
    let mut view = rendered(&[(1, &[10, 11])]);
    drag(
        &mut view,
        &[Gesture::DragStart(TabId(10)), Gesture::Drop(Some(TabId(10)))],
    );
    assert!(view.take_requests().is_empty());
}

#[test]
fn drop_on_other_window_row_moves_to_its_index() {
    let mut view = rendered(&[(1, &[10, 11]), (2, &[20])]);
    drag(
        &mut view,
        &[
            Gesture::DragStart(TabId(10)),
            Gesture::DragOver(Some(TabId(20))),
            Gesture::Drop(Some(TabId(20))),
        ],
    );
    assert_eq!(
        view.take_requests(),
        vec![HostRequest::Move {
            tab_id: TabId(10),
            window_id: WindowId(2),
            index: MoveIndex::At(0),
        }]
    );
    assert_eq!(view.surface().highlighted(Highlight::DropTarget), 0);
    assert!(view.drag_session().is_none());
}

#[test]
fn same_window_downward_drop_sends_unadjusted_index() {
    let mut view = rendered(&[(1, &[10, 11, 12])]);
    drag(
        &mut view,
        &[Gesture::DragStart(TabId(10)), Gesture::Drop(Some(TabId(12)))],
    );
    assert_eq!(
        moves(&view.take_requests()),
        vec![HostRequest::Move {
            tab_id: TabId(10),
            window_id: WindowId(1),
            index: MoveIndex::At(2),
        }]
    );
}

#[test]
fn same_window_downward_drop_adjusts_when_configured() {
    let mut config = PopupConfig::default();
    config.drag.adjust_same_window_downward = true;
    let mut view = rendered_with(&[(1, &[10, 11, 12])], config);
    drag(
        &mut view,
        &[Gesture::DragStart(TabId(10)), Gesture::Drop(Some(TabId(12)))],
    );
    assert_eq!(
        moves(&view.take_requests()),
        vec![HostRequest::Move {
            tab_id: TabId(10),
            window_id: WindowId(1),
            index: MoveIndex::At(1),
        }]
    );
}

#[test]
fn header_drop_appends() {
    let mut view = rendered(&[(1, &[10]), (2, &[20, 21])]);
    drag(
        &mut view,
        &[
            Gesture::DragStart(TabId(10)),
            Gesture::HeaderDragOver(WindowId(2)),
            Gesture::HeaderDrop(WindowId(2)),
        ],
    );
    assert_eq!(
        view.take_requests(),
        vec![HostRequest::Move {
            tab_id: TabId(10),
            window_id: WindowId(2),
            index: MoveIndex::Append,
        }]
    );
    assert!(!view.surface().header_has(WindowId(2), Highlight::WindowDropTarget));
}

#[test]
fn header_highlight_only_without_row_indicator() {
    let mut view = rendered(&[(1, &[10, 11]), (2, &[20])]);
    drag(
        &mut view,
        &[
            Gesture::DragStart(TabId(10)),
            Gesture::DragOver(Some(TabId(11))),
            Gesture::HeaderDragOver(WindowId(2)),
        ],
    );
    assert!(!view.surface().header_has(WindowId(2), Highlight::WindowDropTarget));

    drag(
        &mut view,
        &[Gesture::DragLeave(TabId(11)), Gesture::HeaderDragOver(WindowId(2))],
    );
    assert!(view.surface().header_has(WindowId(2), Highlight::WindowDropTarget));
}

#[test]
fn header_highlight_moves_between_headers() {
    let mut view = rendered(&[(1, &[10]), (2, &[20])]);
    drag(
        &mut view,
        &[
            Gesture::DragStart(TabId(10)),
            Gesture::HeaderDragOver(WindowId(1)),
            Gesture::HeaderDragOver(WindowId(2)),
        ],
    );
    assert_eq!(view.surface().highlighted(Highlight::WindowDropTarget), 1);
    assert!(view.surface().header_has(WindowId(2), Highlight::WindowDropTarget));

    view.handle(Gesture::HeaderDragLeave(WindowId(2))).unwrap();
    assert_eq!(view.surface().highlighted(Highlight::WindowDropTarget), 0);
}

#[test]
fn header_drop_yields_to_row_indicator() {
    let mut view = rendered(&[(1, &[10, 11]), (2, &[20])]);
    drag(
        &mut view,
        &[
            Gesture::DragStart(TabId(10)),
            Gesture::DragOver(Some(TabId(20))),
            Gesture::HeaderDrop(WindowId(2)),
        ],
    );
    assert!(moves(&view.take_requests()).is_empty());
}

#[test]
fn gestures_without_session_do_nothing() {
    let mut view = rendered(&[(1, &[10, 11]), (2, &[20])]);
    drag(
        &mut view,
        &[
            Gesture::DragOver(Some(TabId(11))),
            Gesture::HeaderDragOver(WindowId(2)),
            Gesture::Drop(Some(TabId(11))),
            Gesture::HeaderDrop(WindowId(2)),
        ],
    );
    assert!(view.take_requests().is_empty());
    assert_eq!(view.surface().highlighted(Highlight::DropTarget), 0);
    assert_eq!(view.surface().highlighted(Highlight::WindowDropTarget), 0);
}

#[test]
fn drag_end_clears_everything() {
    let mut view = rendered(&[(1, &[10, 11]), (2, &[20])]);
    drag(
        &mut view,
        &[
            Gesture::DragStart(TabId(10)),
            Gesture::DragOver(Some(TabId(11))),
            Gesture::DragLeave(TabId(11)),
            Gesture::HeaderDragOver(WindowId(2)),
            Gesture::DragOver(Some(TabId(20))),
            Gesture::DragEnd,
        ],
    );
    assert!(view.drag_session().is_none());
    for highlight in Highlight::ALL {
        assert_eq!(view.surface().highlighted(highlight), 0);
    }
    assert!(view.take_requests().is_empty());
}

#[test]
fn drag_end_after_drop_is_harmless() {
    let mut view = rendered(&[(1, &[10]), (2, &[20])]);
    drag(
        &mut view,
        &[
            Gesture::DragStart(TabId(10)),
            Gesture::Drop(Some(TabId(20))),
            Gesture::DragEnd,
        ],
    );
    assert_eq!(moves(&view.take_requests()).len(), 1);
    assert!(view.drag_session().is_none());
    assert_eq!(view.surface().highlighted(Highlight::Dragging), 0);
}

#[test]
fn move_completion_rerenders_even_on_failure() {
    let mut view = rendered(&[(1, &[10]), (2, &[20])]);
    view.complete(HostCompletion::Moved {
        tab_id: TabId(10),
        result: Err(HostError::Move("Tabs cannot be edited right now".into())),
    })
    .unwrap();
    assert_eq!(view.take_requests(), vec![HostRequest::Enumerate]);
    assert!(view.surface().nodes().is_empty());
}

#[test]
fn unknown_rows_are_ignored() {
    let mut view = rendered(&[(1, &[10])]);
    drag(
        &mut view,
        &[
            Gesture::Activate(TabId(99)),
            Gesture::Close(TabId(99)),
            Gesture::DragStart(TabId(99)),
        ],
    );
    assert!(view.take_requests().is_empty());
    assert!(view.drag_session().is_none());
    assert_eq!(view.surface().row_count(WindowId(1)), 1);
}
