use dioxus::prelude::*;

use crate::time::sleep_ms;

/// A copy of `source` that only follows it after `delay_ms` without changes.
pub fn use_debounced(source: Signal<String>, delay_ms: u32) -> Signal<String> {
    let mut debounced = use_signal(|| source.peek().clone());
    let mut generation = use_signal(|| 0u64);

    use_effect(move || {
        let value = source();
        let current = *generation.peek() + 1;
        generation.set(current);
        if delay_ms == 0 {
            debounced.set(value);
            return;
        }
        spawn(async move {
            sleep_ms(delay_ms).await;
            // Superseded by a later keystroke.
            if *generation.peek() == current {
                debounced.set(value);
            }
        });
    });

    debounced
}
