use super::util::*;

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 3, 10);
    assert_eq!(index, 2);
}

#[test]
fn test_scroll_down_empty_list() {
    let (mut index, mut scroll) = (0, 0);
    scroll_down(&mut index, &mut scroll, 0, 10);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_top_and_bottom() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 25, 10);
    assert_eq!((index, scroll), (24, 15));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom_empty_is_noop() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 0, 10);
    assert_eq!((index, scroll), (0, 0));
}

// ── progress_cells ────────────────────────────────────────────

#[test]
fn test_progress_cells() {
    assert_eq!(progress_cells(0.0, 20), 0);
    assert_eq!(progress_cells(50.0, 20), 10);
    assert_eq!(progress_cells(100.0, 20), 20);
}

#[test]
fn test_progress_cells_clamps() {
    assert_eq!(progress_cells(120.0, 20), 20);
    assert_eq!(progress_cells(-5.0, 20), 0);
}
