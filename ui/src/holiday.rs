use dioxus::prelude::*;
use jiff::Zoned;

use crate::calendar::{CalendarState, DayCell, WEEKDAYS, day_label};

/// Month view with previous/next/today controls.
///
/// Today is read from the clock when rendering and when "Today" is clicked.
/// The state lives with the caller so that the inline and maximized copies of
/// the calendar show the same month and selection.
#[component]
pub fn HolidayCalendar(state: Signal<CalendarState>) -> Element {
    // Read on every render so a page left open past midnight moves on.
    let today = Zoned::now().date();
    let current = state();
    let selected_label = current.selected_label();
    let month_label = current.month_label();

    rsx! {
        div { class: "calendar",
            div { class: "calendar-controls",
                div { class: "calendar-nav",
                    button {
                        r#type: "button",
                        class: "btn btn-icon",
                        title: "Previous",
                        aria_label: "Previous month",
                        onclick: move |_| state.write().previous_month(),
                        "‹"
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-icon",
                        title: "Next",
                        aria_label: "Next month",
                        onclick: move |_| state.write().next_month(),
                        "›"
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-primary",
                        onclick: move |_| state.write().today(Zoned::now().date()),
                        "Today"
                    }
                }
                div { class: "calendar-selected", "{selected_label}" }
                div { class: "calendar-month",
                    "{month_label}"
                    span { class: "calendar-mode", "Month" }
                }
            }

            div { class: "calendar-grid",
                for name in WEEKDAYS {
                    div { key: "{name}", class: "calendar-weekday", "{name}" }
                }
                for (index, cell) in current.grid().into_iter().enumerate() {
                    {
                        match cell {
                            DayCell::Blank => rsx! {
                                div { key: "{index}", class: "calendar-cell blank" }
                            },
                            DayCell::Day(day) => {
                                let number = day.day();
                                let label = format!("Select {}", day_label(day));
                                rsx! {
                                    button {
                                        key: "{index}",
                                        r#type: "button",
                                        class: "calendar-cell",
                                        class: if day == today { "today" },
                                        class: if day == current.selected { "selected" },
                                        aria_label: label,
                                        onclick: move |_| state.write().select(day),
                                        "{number}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
