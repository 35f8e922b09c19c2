//! Property-based tests for the pairing, flattening and virtualization
//! invariants.

use diffpane::prelude::*;
use proptest::prelude::*;

fn arb_line() -> impl Strategy<Value = Line> {
    prop_oneof![
        (1u32..100_000, "[ -~]{0,60}").prop_map(|(n, s)| Line::addition(n, s)),
        (1u32..100_000, "[ -~]{0,60}").prop_map(|(n, s)| Line::deletion(n, s)),
        (1u32..100_000, 1u32..100_000, "[ -~]{0,60}")
            .prop_map(|(o, n, s)| Line::context(o, n, s)),
    ]
}

fn arb_hunk(index: usize) -> impl Strategy<Value = Hunk> {
    (
        prop::collection::vec(arb_line(), 1..40),
        1u32..50_000,
        proptest::option::of("[A-Za-z_ ]{1,30}"),
    )
        .prop_map(move |(lines, old_start, header)| Hunk::new(index, header, old_start, lines))
}

fn arb_diff() -> impl Strategy<Value = FileDiff> {
    prop::collection::vec(prop::collection::vec(arb_line(), 1..30), 0..8).prop_map(|groups| {
        let hunks = groups
            .into_iter()
            .enumerate()
            .map(|(i, lines)| Hunk::new(i, None, (i as u32 + 1) * 100, lines))
            .collect();
        FileDiff::new(hunks, FileStatus::Modified)
    })
}

/// Independent count of split rows: one per context line, plus
/// `max(deletions, additions)` per change run.
fn expected_split_rows(hunk: &Hunk) -> usize {
    let mut deletions = 0usize;
    let mut additions = 0usize;
    let mut total = 0usize;
    for line in &hunk.lines {
        match line.kind {
            LineKind::Deletion => deletions += 1,
            LineKind::Addition => additions += 1,
            LineKind::Context => {
                total += deletions.max(additions) + 1;
                deletions = 0;
                additions = 0;
            }
        }
    }
    total + deletions.max(additions)
}

proptest! {
    #[test]
    fn pairing_row_count_matches_run_structure(hunk in arb_hunk(0)) {
        let rows = pair_lines(&hunk);
        prop_assert_eq!(rows.len(), expected_split_rows(&hunk));
    }

    #[test]
    fn paired_rows_always_have_a_side(hunk in arb_hunk(3)) {
        for row in pair_lines(&hunk) {
            prop_assert!(row.old_line.is_some() || row.new_line.is_some());
            prop_assert_eq!(row.hunk_index, 3);
        }
    }

    #[test]
    fn pairing_never_crosses_sides(hunk in arb_hunk(0)) {
        for row in pair_lines(&hunk) {
            if let Some(old) = &row.old_line {
                prop_assert_ne!(old.kind, LineKind::Addition);
            }
            if let Some(new) = &row.new_line {
                prop_assert_ne!(new.kind, LineKind::Deletion);
            }
        }
    }

    #[test]
    fn pairing_preserves_side_order(hunk in arb_hunk(0)) {
        // Reading the old side top to bottom reproduces the hunk's
        // deletions and contexts in input order; same for the new side.
        let rows = pair_lines(&hunk);
        let old_side: Vec<&str> = rows
            .iter()
            .filter_map(|r| r.old_line.as_ref())
            .map(|l| l.content.as_str())
            .collect();
        let old_input: Vec<&str> = hunk
            .lines
            .iter()
            .filter(|l| l.kind != LineKind::Addition)
            .map(|l| l.content.as_str())
            .collect();
        prop_assert_eq!(old_side, old_input);

        let new_side: Vec<&str> = rows
            .iter()
            .filter_map(|r| r.new_line.as_ref())
            .map(|l| l.content.as_str())
            .collect();
        let new_input: Vec<&str> = hunk
            .lines
            .iter()
            .filter(|l| l.kind != LineKind::Deletion)
            .map(|l| l.content.as_str())
            .collect();
        prop_assert_eq!(new_side, new_input);
    }

    #[test]
    fn unified_flatten_conserves_rows(diff in arb_diff()) {
        let rows = flatten(&diff, ViewMode::Unified);
        prop_assert_eq!(rows.len(), diff.hunks.len() + diff.total_line_count());
        let headers = rows.iter().filter(|r| r.is_header()).count();
        prop_assert_eq!(headers, diff.hunks.len());
    }

    #[test]
    fn split_flatten_conserves_rows(diff in arb_diff()) {
        let rows = flatten(&diff, ViewMode::Split);
        let expected: usize = diff.hunks.iter().map(expected_split_rows).sum();
        prop_assert_eq!(rows.len(), diff.hunks.len() + expected);
    }

    #[test]
    fn flatten_is_deterministic(diff in arb_diff()) {
        prop_assert_eq!(
            flatten(&diff, ViewMode::Unified),
            flatten(&diff, ViewMode::Unified)
        );
        prop_assert_eq!(
            flatten(&diff, ViewMode::Split),
            flatten(&diff, ViewMode::Split)
        );
    }

    #[test]
    fn hunk_indices_are_nondecreasing_in_render_order(diff in arb_diff()) {
        let rows = flatten(&diff, ViewMode::Unified);
        for pair in rows.windows(2) {
            prop_assert!(pair[0].hunk_index() <= pair[1].hunk_index());
        }
    }

    #[test]
    fn virtualizer_offsets_are_monotonic(
        diff in arb_diff(),
        header in 1u16..4,
        line in 1u16..3,
    ) {
        let rows = flatten(&diff, ViewMode::Unified);
        let virt = Virtualizer::new(&rows, RowHeights::new(header, line));
        let mut prev = 0usize;
        for i in 0..virt.row_count() {
            let off = virt.offset_of(i).unwrap();
            prop_assert!(off >= prev);
            prev = off;
        }
        let total: usize = rows
            .iter()
            .map(|r| usize::from(RowHeights::new(header, line).height_of(r)))
            .sum();
        prop_assert_eq!(virt.total_height(), total);
    }

    #[test]
    fn virtual_range_contains_visible_range(
        diff in arb_diff(),
        viewport in 1usize..50,
        overscan in 0usize..10,
        offset in 0usize..2_000,
    ) {
        let rows = flatten(&diff, ViewMode::Unified);
        let virt = Virtualizer::new(&rows, RowHeights::UNIFORM)
            .viewport_height(viewport)
            .overscan(overscan)
            .scroll_offset(offset);

        let visible = virt.visible_range();
        let window = virt.virtual_range();
        prop_assert!(window.start <= visible.start);
        prop_assert!(visible.end <= window.end);
        prop_assert!(window.end <= virt.row_count());
        prop_assert!(virt.current_offset() <= virt.max_scroll_offset());
    }

    #[test]
    fn visible_rows_intersect_the_viewport(
        diff in arb_diff(),
        viewport in 1usize..50,
        offset in 0usize..2_000,
    ) {
        let rows = flatten(&diff, ViewMode::Unified);
        let virt = Virtualizer::new(&rows, RowHeights::new(2, 1))
            .viewport_height(viewport)
            .overscan(0)
            .scroll_offset(offset);

        let top = virt.current_offset();
        let bottom = top + viewport;
        for i in virt.visible_range() {
            let row_top = virt.offset_of(i).unwrap();
            let row_bottom = row_top + virt.height_of(i).unwrap();
            prop_assert!(row_top < bottom && row_bottom > top);
        }
    }

    #[test]
    fn scroll_to_focus_targets_the_header_offset(
        diff in arb_diff(),
        hunk_index in 0usize..8,
        viewport in 1usize..40,
    ) {
        let rows = flatten(&diff, ViewMode::Unified);
        let mut virt = Virtualizer::new(&rows, RowHeights::UNIFORM)
            .viewport_height(viewport);

        let mut nav = HunkNavigator::new();
        nav.focus(Some(hunk_index));
        let scrolled = nav.scroll_to_focus(&rows, &mut virt);

        match rows
            .iter()
            .position(|r| r.is_header() && r.hunk_index() == hunk_index)
        {
            Some(row_ix) => {
                prop_assert!(scrolled);
                let expected = virt.offset_of(row_ix).unwrap().min(virt.max_scroll_offset());
                prop_assert_eq!(ScrollRegion::current_offset(&virt), expected);
            }
            None => {
                prop_assert!(!scrolled);
                prop_assert_eq!(ScrollRegion::current_offset(&virt), 0);
            }
        }
    }

    #[test]
    fn rendered_tree_never_drops_window_content(
        diff in arb_diff(),
        offset in 0usize..500,
    ) {
        // Direct or virtualized, every materialized unified row's content
        // appears in the collected text.
        let pane = DiffPane::new(diff.clone())
            .viewport_height(20)
            .scroll_offset(offset);
        let text = pane.to_node().collect_text();

        let rows = flatten(&diff, ViewMode::Unified);
        let window = match pane.virtualizer() {
            Some(virt) => virt.virtual_range(),
            None => 0..rows.len(),
        };
        for row in &rows[window.start..window.end] {
            if let FlattenedRow::Content { payload: RowPayload::Unified(line), .. } = row {
                prop_assert!(text.contains(line.content.as_str()));
            }
        }
    }
}
