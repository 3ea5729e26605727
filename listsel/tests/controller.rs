use std::cell::RefCell;
use std::rc::Rc;

use listsel::{
    CheckSelectModel, ControllerConfig, Key, ListSelection, Modifiers, MouseButton, PointerEvent,
    SelectionController, SingleSelectionModel,
};

/// Press and release over `index`, as a click does.
fn click<L: ListSelection>(
    controller: &SelectionController,
    model: &mut L,
    index: Option<usize>,
    mods: Modifiers,
) {
    controller
        .handle_pointer(model, &PointerEvent::down(mods), index)
        .unwrap();
    controller
        .handle_pointer(model, &PointerEvent::up(mods), index)
        .unwrap();
}

fn key<L: ListSelection>(
    controller: &SelectionController,
    model: &mut L,
    key: Key,
    mods: Modifiers,
) -> bool {
    controller.handle_key(model, key, mods).unwrap()
}

fn counted(length: usize) -> (CheckSelectModel, Rc<RefCell<usize>>) {
    let mut model = CheckSelectModel::new(length);
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    model.add_listener(move |_, _| *counter.borrow_mut() += 1);
    (model, count)
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn test_plain_click_selects_only_target() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(5);
    model.set_selected_indexes(&[0, 1]).unwrap();

    click(&controller, &mut model, Some(3), Modifiers::new());

    assert_eq!(model.selected_indexes(), vec![3]);
    assert_eq!(model.lead_index(), Some(3));
    assert_eq!(model.anchor_index(), Some(3));
    assert!(!model.check_select_mode());
}

#[test]
fn test_plain_click_on_selected_waits_for_release() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(5);
    model.set_selected_indexes(&[1, 2]).unwrap();

    controller
        .handle_pointer(&mut model, &PointerEvent::down(Modifiers::new()), Some(2))
        .unwrap();
    assert_eq!(model.selected_indexes(), vec![1, 2]);

    controller
        .handle_pointer(&mut model, &PointerEvent::up(Modifiers::new()), Some(2))
        .unwrap();
    assert_eq!(model.selected_indexes(), vec![2]);
}

#[test]
fn test_right_click_on_selected_keeps_selection() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(5);
    model.set_selected_indexes(&[1, 2]).unwrap();

    let down = PointerEvent::down(Modifiers::new()).with_button(MouseButton::Right);
    let up = PointerEvent::up(Modifiers::new()).with_button(MouseButton::Right);
    controller.handle_pointer(&mut model, &down, Some(1)).unwrap();
    controller.handle_pointer(&mut model, &up, Some(1)).unwrap();

    assert_eq!(model.selected_indexes(), vec![1, 2]);
    assert!(model.check_select_mode());
}

#[test]
fn test_ctrl_click_toggles_and_enters_check_select() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(5);

    click(&controller, &mut model, Some(2), Modifiers::ctrl());
    assert_eq!(model.selected_indexes(), vec![2]);
    assert!(model.check_select_mode(), "one checked item still in check mode");
    assert_eq!(model.lead_index(), Some(2));
    assert_eq!(model.anchor_index(), Some(2));

    click(&controller, &mut model, Some(4), Modifiers::ctrl());
    assert_eq!(model.selected_indexes(), vec![2, 4]);

    click(&controller, &mut model, Some(2), Modifiers::ctrl());
    click(&controller, &mut model, Some(4), Modifiers::ctrl());
    assert!(model.selected_indexes().is_empty());
    assert!(!model.check_select_mode());
}

#[test]
fn test_checkmark_click_behaves_like_ctrl_click() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(5);
    model.select_only(0).unwrap();

    let down = PointerEvent::down(Modifiers::new()).on_checkmark();
    let up = PointerEvent::up(Modifiers::new()).on_checkmark();
    controller.handle_pointer(&mut model, &down, Some(3)).unwrap();
    controller.handle_pointer(&mut model, &up, Some(3)).unwrap();

    assert_eq!(model.selected_indexes(), vec![0, 3]);
    assert!(model.check_select_mode());
}

#[test]
fn test_plain_click_leaves_check_select() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(5);
    click(&controller, &mut model, Some(1), Modifiers::ctrl());
    assert!(model.check_select_mode());

    click(&controller, &mut model, Some(3), Modifiers::new());
    assert_eq!(model.selected_indexes(), vec![3]);
    assert!(!model.check_select_mode());
}

#[test]
fn test_shift_click_selects_range_from_anchor() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(10);
    click(&controller, &mut model, Some(2), Modifiers::new());
    click(&controller, &mut model, Some(5), Modifiers::shift());

    assert_eq!(model.selected_indexes(), vec![2, 3, 4, 5]);
    assert_eq!(model.lead_index(), Some(5));
    assert_eq!(model.anchor_index(), Some(2));

    // Shrinking the range from the same anchor.
    click(&controller, &mut model, Some(0), Modifiers::shift());
    assert_eq!(model.selected_indexes(), vec![0, 1, 2]);
}

#[test]
fn test_shift_click_on_single_model() {
    let controller = SelectionController::default();
    let mut model = SingleSelectionModel::new(10);
    click(&controller, &mut model, Some(2), Modifiers::new());
    click(&controller, &mut model, Some(6), Modifiers::shift());
    assert_eq!(model.selected_indexes(), vec![6]);
    assert_eq!(model.lead_index(), Some(6));
}

#[test]
fn test_ctrl_click_on_single_model_is_plain_click() {
    let controller = SelectionController::default();
    let mut model = SingleSelectionModel::new(5);
    click(&controller, &mut model, Some(1), Modifiers::ctrl());
    click(&controller, &mut model, Some(3), Modifiers::ctrl());
    assert_eq!(model.selected_indexes(), vec![3]);
}

#[test]
fn test_click_on_blank_clears() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(5);
    model.set_selected_indexes(&[1, 2]).unwrap();

    click(&controller, &mut model, None, Modifiers::new());

    assert!(model.selected_indexes().is_empty());
    assert_eq!(model.lead_index(), None);
    assert_eq!(model.anchor_index(), None);
    assert!(!model.check_select_mode());
}

#[test]
fn test_click_out_of_range_is_an_error() {
    let controller = SelectionController::default();
    let (mut model, count) = counted(3);
    let down = PointerEvent::down(Modifiers::new());
    let result = controller.handle_pointer(&mut model, &down, Some(7));
    assert!(result.is_err());
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn test_one_notification_per_pointer_event() {
    let controller = SelectionController::default();
    let (mut model, count) = counted(10);
    click(&controller, &mut model, Some(2), Modifiers::new());
    assert_eq!(*count.borrow(), 1);

    // unselect + lead + range in one batch
    controller
        .handle_pointer(&mut model, &PointerEvent::down(Modifiers::shift()), Some(7))
        .unwrap();
    assert_eq!(*count.borrow(), 2);
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn test_arrows_move_selection() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(5);

    assert!(key(&controller, &mut model, Key::Down, Modifiers::new()));
    assert_eq!(model.selected_indexes(), vec![0]);
    assert_eq!(model.lead_index(), Some(0));

    key(&controller, &mut model, Key::Down, Modifiers::new());
    key(&controller, &mut model, Key::Down, Modifiers::new());
    assert_eq!(model.selected_indexes(), vec![2]);
    assert_eq!(model.anchor_index(), Some(2));

    key(&controller, &mut model, Key::Up, Modifiers::new());
    assert_eq!(model.selected_indexes(), vec![1]);

    key(&controller, &mut model, Key::End, Modifiers::new());
    assert_eq!(model.selected_indexes(), vec![4]);

    // Already at the bottom: consumed, nothing moves.
    assert!(key(&controller, &mut model, Key::Down, Modifiers::new()));
    assert_eq!(model.selected_indexes(), vec![4]);

    key(&controller, &mut model, Key::Home, Modifiers::new());
    assert_eq!(model.selected_indexes(), vec![0]);
}

#[test]
fn test_up_without_lead_goes_to_last() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(4);
    key(&controller, &mut model, Key::Up, Modifiers::new());
    assert_eq!(model.lead_index(), Some(3));
}

#[test]
fn test_shift_arrows_extend_from_anchor() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(6);
    click(&controller, &mut model, Some(2), Modifiers::new());

    key(&controller, &mut model, Key::Down, Modifiers::shift());
    key(&controller, &mut model, Key::Down, Modifiers::shift());
    assert_eq!(model.selected_indexes(), vec![2, 3, 4]);
    assert_eq!(model.lead_index(), Some(4));
    assert_eq!(model.anchor_index(), Some(2));
    assert!(model.check_select_mode());

    key(&controller, &mut model, Key::Up, Modifiers::shift());
    assert_eq!(model.selected_indexes(), vec![2, 3]);
}

#[test]
fn test_shift_arrow_without_anchor_sets_it() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(6);
    key(&controller, &mut model, Key::Down, Modifiers::shift());
    assert_eq!(model.selected_indexes(), vec![0]);
    assert_eq!(model.anchor_index(), Some(0));
}

#[test]
fn test_ctrl_arrows_move_focus_only() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(6);
    click(&controller, &mut model, Some(1), Modifiers::new());

    key(&controller, &mut model, Key::Down, Modifiers::ctrl());
    key(&controller, &mut model, Key::Down, Modifiers::ctrl());
    assert_eq!(model.selected_indexes(), vec![1]);
    assert_eq!(model.lead_index(), Some(3));
    assert_eq!(model.anchor_index(), Some(3));
}

#[test]
fn test_ctrl_space_toggles_lead() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(6);
    click(&controller, &mut model, Some(1), Modifiers::new());
    assert!(!model.check_select_mode());

    // Lone selected item: stays selected, mode switches on.
    assert!(key(&controller, &mut model, Key::Char(' '), Modifiers::ctrl()));
    assert_eq!(model.selected_indexes(), vec![1]);
    assert!(model.check_select_mode());

    key(&controller, &mut model, Key::Down, Modifiers::ctrl());
    key(&controller, &mut model, Key::Char(' '), Modifiers::ctrl());
    assert_eq!(model.selected_indexes(), vec![1, 2]);

    key(&controller, &mut model, Key::Char(' '), Modifiers::ctrl());
    assert_eq!(model.selected_indexes(), vec![1]);
    assert!(model.check_select_mode());
}

#[test]
fn test_space_selects_unselected_lead() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(4);
    model.set_lead_index(Some(2)).unwrap();

    assert!(key(&controller, &mut model, Key::Char(' '), Modifiers::new()));
    assert_eq!(model.selected_indexes(), vec![2]);

    // Already selected: left to the host (e.g. open a preview).
    assert!(!key(&controller, &mut model, Key::Char(' '), Modifiers::new()));
}

#[test]
fn test_space_without_lead_is_not_consumed() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(4);
    assert!(!key(&controller, &mut model, Key::Char(' '), Modifiers::ctrl()));
}

#[test]
fn test_ctrl_a_selects_all_in_check_select() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(1);
    assert!(key(&controller, &mut model, Key::Char('a'), Modifiers::ctrl()));
    assert_eq!(model.selected_indexes(), vec![0]);
    assert!(model.check_select_mode());
}

#[test]
fn test_ctrl_a_ignored_by_single_model() {
    let controller = SelectionController::default();
    let mut model = SingleSelectionModel::new(3);
    assert!(!key(&controller, &mut model, Key::Char('a'), Modifiers::ctrl()));
    assert!(model.selected_indexes().is_empty());
}

#[test]
fn test_escape_unselects() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(4);
    model.select_all();
    assert!(key(&controller, &mut model, Key::Escape, Modifiers::new()));
    assert!(model.selected_indexes().is_empty());
    assert!(!model.check_select_mode());
}

#[test]
fn test_escape_with_modifiers_is_not_consumed() {
    let controller = SelectionController::default();
    let (mut model, count) = counted(4);
    model.select_all();
    let before = *count.borrow();
    assert!(!key(&controller, &mut model, Key::Escape, Modifiers::shift()));
    assert_eq!(model.selected_count(), 4);
    assert_eq!(*count.borrow(), before);
}

#[test]
fn test_alt_keys_left_to_host() {
    let controller = SelectionController::default();
    let (mut model, count) = counted(4);
    click(&controller, &mut model, Some(1), Modifiers::new());
    let before = *count.borrow();
    let alt = Modifiers {
        alt: true,
        ..Modifiers::new()
    };

    for k in [Key::Down, Key::Home, Key::End, Key::Escape, Key::Char(' ')] {
        assert!(!key(&controller, &mut model, k, alt));
    }
    assert_eq!(model.lead_index(), Some(1));
    assert_eq!(model.selected_indexes(), vec![1]);
    assert_eq!(*count.borrow(), before);
}

#[test]
fn test_page_keys_in_grid() {
    let controller = SelectionController::new(ControllerConfig::default().grid(4).page_size(2));
    let mut model = CheckSelectModel::new(30);
    click(&controller, &mut model, Some(1), Modifiers::new());

    key(&controller, &mut model, Key::PageDown, Modifiers::new());
    assert_eq!(model.lead_index(), Some(9));
    key(&controller, &mut model, Key::Right, Modifiers::new());
    assert_eq!(model.lead_index(), Some(10));
    key(&controller, &mut model, Key::Up, Modifiers::new());
    assert_eq!(model.lead_index(), Some(6));
    key(&controller, &mut model, Key::PageUp, Modifiers::new());
    assert_eq!(model.lead_index(), Some(0));
    assert_eq!(model.selected_indexes(), vec![0]);
}

#[test]
fn test_unhandled_key() {
    let controller = SelectionController::default();
    let (mut model, count) = counted(4);
    assert!(!key(&controller, &mut model, Key::Enter, Modifiers::new()));
    assert!(!key(&controller, &mut model, Key::Char('x'), Modifiers::new()));
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn test_works_through_trait_object() {
    let controller = SelectionController::default();
    let mut model = CheckSelectModel::new(3);
    let dynamic: &mut dyn ListSelection = &mut model;
    controller
        .handle_key(dynamic, Key::Down, Modifiers::new())
        .unwrap();
    assert_eq!(model.selected_indexes(), vec![0]);
}
