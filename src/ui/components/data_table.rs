use std::collections::HashMap;

use dioxus::prelude::*;

use crate::domain::table::TableModel;

const SEARCH_STYLE: &str = "max-width: 320px; padding: 6px 10px; border: 1px solid #ccc; border-radius: 6px;";
const EMPTY_STYLE: &str = "border: 1px solid #ddd; border-radius: 8px; padding: 24px; text-align: center; color: #666; background: #fff;";
const HEADER_CELL_STYLE: &str = "position: sticky; top: 0; background: #f5f6f8; text-align: left; padding: 8px; border-bottom: 1px solid #ddd; font-size: 12px; text-transform: uppercase; color: #555;";
const BODY_CELL_STYLE: &str = "padding: 8px; border-bottom: 1px solid #eee; color: #333;";
const FILTER_STYLE: &str = "margin-top: 4px; width: 100%; max-width: 140px; padding: 2px 6px; border: 1px solid #ccc; border-radius: 4px; font-size: 12px;";

/// Text for a filter input. The table state only keeps the trimmed filter, so
/// the typed text is shown while it still trims to the stored value; after a
/// reset of the table state the stored value wins.
fn filter_input_text(typed: Option<&str>, stored: &str) -> String {
    match typed {
        Some(typed) if typed.trim() == stored => typed.to_string(),
        _ => stored.to_string(),
    }
}

/// Renders a [`TableModel`] and reports interaction back to the owner of the
/// table state.
#[component]
pub fn DataTable(
    model: TableModel,
    on_sort: EventHandler<String>,
    on_filter: EventHandler<(String, String)>,
    on_search: EventHandler<String>,
    #[props(default)] actions: Vec<String>,
    on_action: EventHandler<(String, String)>,
) -> Element {
    let search_placeholder = model.search_placeholder.clone();
    let search = model.search.clone();
    let has_actions = !actions.is_empty();
    let mut typed_filters = use_signal(HashMap::<String, String>::new);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 12px; margin-top: 12px;",
            if let Some(placeholder) = search_placeholder {
                input {
                    r#type: "search",
                    style: SEARCH_STYLE,
                    placeholder: "{placeholder}",
                    value: "{search}",
                    aria_label: "Search",
                    oninput: move |event| on_search.call(event.value()),
                }
            }

            if model.is_empty() {
                div { style: EMPTY_STYLE, "{model.empty_message}" }
            } else {
                div {
                    style: "overflow: auto; border: 1px solid #ddd; border-radius: 8px;",
                    table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                        thead {
                            tr {
                                {model.headers.iter().map(|header| {
                                    let sort_id = header.id.clone();
                                    let filter_id = header.id.clone();
                                    let label = header.label.clone();
                                    let indicator = header.sort_indicator();
                                    let filter = filter_input_text(
                                        typed_filters.read().get(&header.id).map(String::as_str),
                                        &header.filter,
                                    );
                                    let style = format!(
                                        "{HEADER_CELL_STYLE} {}",
                                        header.style.clone().unwrap_or_default()
                                    );
                                    rsx!(
                                        th { key: "{header.id}", style: "{style}",
                                            if header.sortable {
                                                button {
                                                    style: "border: none; background: none; cursor: pointer; font: inherit; color: inherit; padding: 0;",
                                                    onclick: move |_| on_sort.call(sort_id.clone()),
                                                    "{label} {indicator}"
                                                }
                                            } else {
                                                span { "{label}" }
                                            }
                                            if header.filterable {
                                                div {
                                                    input {
                                                        r#type: "text",
                                                        style: FILTER_STYLE,
                                                        placeholder: "Filter...",
                                                        value: "{filter}",
                                                        aria_label: "Filter by {header.label}",
                                                        oninput: move |event| {
                                                            let text = event.value();
                                                            typed_filters.write().insert(filter_id.clone(), text.clone());
                                                            on_filter.call((filter_id.clone(), text))
                                                        },
                                                    }
                                                }
                                            }
                                        }
                                    )
                                })}
                                if has_actions {
                                    th { style: HEADER_CELL_STYLE, "Actions" }
                                }
                            }
                        }
                        tbody {
                            {model.rows.iter().map(|row| {
                                let row_key = row.key.clone();
                                let actions = actions.clone();
                                rsx!(
                                    tr { key: "{row.key}",
                                        {row.cells.iter().map(|cell| {
                                            let style = format!(
                                                "{BODY_CELL_STYLE} {}",
                                                cell.style.clone().unwrap_or_default()
                                            );
                                            rsx!(td { style: "{style}", "{cell.text}" })
                                        })}
                                        if has_actions {
                                            td { style: "{BODY_CELL_STYLE} white-space: nowrap;",
                                                {actions.into_iter().map(|action| {
                                                    let row_key = row_key.clone();
                                                    let label = action.clone();
                                                    rsx!(
                                                        button {
                                                            style: "margin-right: 6px; border: 1px solid #bbb; background: #fff; padding: 2px 8px; border-radius: 6px; cursor: pointer;",
                                                            onclick: move |_| {
                                                                on_action.call((action.clone(), row_key.clone()))
                                                            },
                                                            "{label}"
                                                        }
                                                    )
                                                })}
                                            }
                                        }
                                    }
                                )
                            })}
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_input_keeps_trailing_space_while_typing() {
        assert_eq!(filter_input_text(Some("north "), "north"), "north ");
        assert_eq!(filter_input_text(Some("north plant"), "north plant"), "north plant");
    }

    #[test]
    fn filter_input_follows_a_reset_table_state() {
        assert_eq!(filter_input_text(Some("north "), ""), "");
        assert_eq!(filter_input_text(None, "pump"), "pump");
    }
}
