//! Page scroll suppression while the editor view is shown.

use crate::AppWindow;
use slint::ComponentHandle;

/// Something whose page scrolling can be switched off.
pub trait ScrollTarget {
    fn set_scroll_locked(&self, locked: bool);
}

impl ScrollTarget for slint::Weak<AppWindow> {
    fn set_scroll_locked(&self, locked: bool) {
        if let Some(ui) = self.upgrade() {
            ui.set_scroll_locked(locked);
        }
    }
}

/// Holds page scrolling off for as long as it lives.
#[must_use = "scrolling is unlocked again as soon as the lock is dropped"]
pub struct ScrollLock<T: ScrollTarget> {
    target: T,
}

impl<T: ScrollTarget> ScrollLock<T> {
    pub fn acquire(target: T) -> Self {
        target.set_scroll_locked(true);
        Self { target }
    }
}

impl ScrollLock<slint::Weak<AppWindow>> {
    pub fn for_window(ui: &AppWindow) -> Self {
        Self::acquire(ui.as_weak())
    }
}

impl<T: ScrollTarget> Drop for ScrollLock<T> {
    fn drop(&mut self) {
        self.target.set_scroll_locked(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Flag(Rc<Cell<bool>>);

    impl ScrollTarget for Flag {
        fn set_scroll_locked(&self, locked: bool) {
            self.0.set(locked);
        }
    }

    #[test]
    fn test_lock_released_on_drop() {
        let flag = Rc::new(Cell::new(false));
        {
            let _lock = ScrollLock::acquire(Flag(flag.clone()));
            assert!(flag.get());
        }
        assert!(!flag.get());
    }

    #[test]
    fn test_lock_released_on_unwind() {
        let flag = Rc::new(Cell::new(false));
        let inner = flag.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _lock = ScrollLock::acquire(Flag(inner));
            panic!("view torn down");
        }));
        assert!(result.is_err());
        assert!(!flag.get());
    }
}
