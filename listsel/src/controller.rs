//! Pointer and keyboard policy for list selection.
//!
//! The controller turns input the host has already decoded (which item was
//! hit, which keys and modifiers were held) into model operations. Each call
//! runs inside one batch, so one input event produces at most one change
//! notification.

use crate::config::ControllerConfig;
use crate::error::Result;
use crate::event::{Key, Modifiers, MouseButton, PointerEvent};
use crate::traits::ListSelection;

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionController {
    config: ControllerConfig,
}

impl SelectionController {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    /// Handle a pointer press or release over item `index`, or over empty
    /// space when `index` is `None`.
    pub fn handle_pointer<L>(
        &self,
        model: &mut L,
        event: &PointerEvent,
        index: Option<usize>,
    ) -> Result<()>
    where
        L: ListSelection + ?Sized,
    {
        model.begin_change();
        let result = match index {
            Some(index) => self.pointer_on_item(model, event, index),
            None => Self::pointer_on_blank(model),
        };
        model.end_change();
        result
    }

    fn pointer_on_blank<L>(model: &mut L) -> Result<()>
    where
        L: ListSelection + ?Sized,
    {
        model.set_lead_index(None)?;
        model.set_anchor_index(None)?;
        model.unselect_all();
        Ok(())
    }

    fn pointer_on_item<L>(&self, model: &mut L, event: &PointerEvent, index: usize) -> Result<()>
    where
        L: ListSelection + ?Sized,
    {
        model.selection().check(index)?;

        let mods = event.modifiers;
        let is_down = event.is_down();
        let anchor = model.anchor_index();
        // A plain primary click on the checkmark behaves like Ctrl+click.
        let checkmark_click = event.on_checkmark
            && model.is_multiple()
            && !mods.shift
            && !mods.ctrl
            && event.button == MouseButton::Left;

        if model.is_multiple() && (mods.ctrl || checkmark_click) {
            // Toggling happens on release.
            if !is_down {
                model.set_check_select_mode(true);
                let selected = model.is_selected(index);
                model.set_index_selected(index, !selected)?;
                model.set_lead_index(Some(index))?;
                model.set_anchor_index(Some(index))?;
            }
        } else if let Some(anchor) = anchor.filter(|&a| mods.shift && a != index) {
            // Range extension happens on press.
            if is_down {
                model.unselect_all();
                model.set_lead_index(Some(index))?;
                if model.is_multiple() {
                    model.select_range(anchor, index)?;
                } else {
                    model.select(index)?;
                }
            }
        } else {
            // Unselected items are taken on press, selected ones on release
            // so a drag can start from the existing selection. A secondary
            // click on a selected item keeps the selection for the context
            // menu.
            let selected = model.is_selected(index);
            let secondary = event.button == MouseButton::Right;
            if selected != is_down && !(selected && secondary) {
                model.set_check_select_mode(false);
                model.select_only(index)?;
            }
        }
        Ok(())
    }

    /// Handle a key press. Returns whether the key was consumed.
    ///
    /// Keys held with Alt are left to the host.
    pub fn handle_key<L>(&self, model: &mut L, key: Key, mods: Modifiers) -> Result<bool>
    where
        L: ListSelection + ?Sized,
    {
        if mods.alt {
            return Ok(false);
        }

        if model.is_multiple() && mods.ctrl && matches!(key, Key::Char('a' | 'A')) {
            model.begin_change();
            model.set_check_select_mode(true);
            model.select_all();
            model.end_change();
            return Ok(true);
        }

        if key == Key::Escape && mods.none() {
            model.unselect_all();
            return Ok(true);
        }

        if key == Key::Char(' ') {
            return Self::space(model, mods);
        }

        let Some(target) = self.navigate(model, key) else {
            return Ok(false);
        };
        if let Some(index) = target {
            model.begin_change();
            let result = Self::move_lead(model, index, mods);
            model.end_change();
            result?;
        }
        Ok(true)
    }

    fn space<L>(model: &mut L, mods: Modifiers) -> Result<bool>
    where
        L: ListSelection + ?Sized,
    {
        let Some(lead) = model.lead_index() else {
            return Ok(false);
        };
        let selected = model.is_selected(lead);

        if mods.ctrl {
            model.begin_change();
            // A lone selected item outside check-select mode stays selected;
            // Ctrl+Space only switches the mode on for it.
            let keep = selected && model.selected_count() == 1 && !model.check_select_mode();
            let result = if keep {
                Ok(())
            } else {
                model.set_index_selected(lead, !selected)
            };
            model.set_check_select_mode(true);
            model.end_change();
            result?;
            return Ok(true);
        }

        if !selected {
            model.select(lead)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Where a navigation key moves the lead. `None` if the key is not a
    /// navigation key, `Some(None)` if it is but there is nowhere to go.
    fn navigate<L>(&self, model: &L, key: Key) -> Option<Option<usize>>
    where
        L: ListSelection + ?Sized,
    {
        let len = model.length();
        let lead = model.lead_index();
        let columns = self.config.columns.max(1);
        let page = self.config.page_size.max(1) * columns;
        let last = len.checked_sub(1);
        let grid = columns > 1;

        let target = match key {
            Key::Home => last.map(|_| 0),
            Key::End => last,
            Key::Up => match lead {
                None => last,
                Some(l) => l.checked_sub(columns),
            },
            Key::Down => match lead {
                None => last.map(|_| 0),
                Some(l) => Some(l + columns).filter(|&i| i < len),
            },
            Key::Left if grid => match lead {
                None => last.map(|_| 0),
                Some(l) => l.checked_sub(1),
            },
            Key::Right if grid => match lead {
                None => last.map(|_| 0),
                Some(l) => Some(l + 1).filter(|&i| i < len),
            },
            Key::PageUp => match lead {
                None => last.map(|_| 0),
                Some(l) => Some(l.saturating_sub(page)),
            },
            Key::PageDown => match lead {
                None => last.map(|_| 0),
                Some(l) => last.map(|last| (l + page).min(last)),
            },
            _ => return None,
        };
        Some(target)
    }

    fn move_lead<L>(model: &mut L, index: usize, mods: Modifiers) -> Result<()>
    where
        L: ListSelection + ?Sized,
    {
        model.set_lead_index(Some(index))?;

        if mods.shift {
            let anchor = model.anchor_index();
            if model.is_multiple() {
                model.unselect_all();
            }
            match anchor {
                Some(anchor) => model.select_range(anchor, index)?,
                None => {
                    model.select(index)?;
                    model.set_anchor_index(Some(index))?;
                }
            }
        } else if mods.ctrl {
            // Ctrl moves the focus only.
            model.set_anchor_index(Some(index))?;
        } else {
            if model.is_multiple() {
                model.unselect_all();
            }
            model.select(index)?;
            model.set_anchor_index(Some(index))?;
        }
        Ok(())
    }
}
