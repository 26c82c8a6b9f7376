use shared::Notification;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct ToastActions {
    pub success: Callback<String>,
    pub error: Callback<String>,
    pub dismiss: Callback<()>,
}

pub struct UseToastResult {
    pub current: Option<Notification>,
    pub actions: ToastActions,
}

/// One toast slot per screen; a new message replaces the visible one.
#[hook]
pub fn use_toast() -> UseToastResult {
    let current = use_state(|| Option::<Notification>::None);
    let next_id = use_mut_ref(|| 0u32);

    let success = {
        let current = current.clone();
        let next_id = next_id.clone();
        use_callback((), move |message: String, _| {
            let id = {
                let mut next = next_id.borrow_mut();
                *next += 1;
                *next
            };
            current.set(Some(Notification::success(id, message)));
        })
    };

    let error = {
        let current = current.clone();
        let next_id = next_id.clone();
        use_callback((), move |message: String, _| {
            let id = {
                let mut next = next_id.borrow_mut();
                *next += 1;
                *next
            };
            current.set(Some(Notification::error(id, message)));
        })
    };

    let dismiss = {
        let current = current.clone();
        use_callback((), move |_: (), _| current.set(None))
    };

    UseToastResult {
        current: (*current).clone(),
        actions: ToastActions {
            success,
            error,
            dismiss,
        },
    }
}
