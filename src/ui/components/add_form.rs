use std::collections::HashMap;

use dioxus::prelude::*;

pub const NONE_OPTION_VALUE: &str = "";

#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    Date,
    /// `(value, label)` pairs; an empty first option is always offered.
    Select(Vec<(String, String)>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text,
        }
    }

    pub fn date(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Date,
        }
    }

    pub fn select(key: &'static str, label: &'static str, options: Vec<(String, String)>) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Select(options),
        }
    }
}

/// Value of `key` in submitted form values, empty when missing.
pub fn form_value(values: &HashMap<String, String>, key: &str) -> String {
    values.get(key).cloned().unwrap_or_default()
}

/// Like [`form_value`] but `None` for blank input.
pub fn form_optional(values: &HashMap<String, String>, key: &str) -> Option<String> {
    Some(form_value(values, key).trim().to_string()).filter(|value| !value.is_empty())
}

/// Inputs to show once a submit has been handled. A rejected submit keeps
/// what the user typed.
fn values_after_submit(
    saved: bool,
    submitted: HashMap<String, String>,
    initial: &HashMap<String, String>,
) -> HashMap<String, String> {
    if saved {
        initial.clone()
    } else {
        submitted
    }
}

/// Generic labelled form. Submitting hands the raw values to `on_submit`,
/// which reports whether they were saved; only a saved form resets to
/// `initial`.
#[component]
pub fn AddForm(
    title: String,
    fields: Vec<FormField>,
    #[props(default)] initial: HashMap<String, String>,
    #[props(default = "Save".to_string())] submit_label: String,
    on_submit: Callback<HashMap<String, String>, bool>,
) -> Element {
    let initial_for_signal = initial.clone();
    let mut values = use_signal(move || initial_for_signal);

    rsx! {
        fieldset {
            style: "border: 1px solid #ddd; border-radius: 8px; padding: 10px 12px; margin: 12px 0; display: flex; flex-wrap: wrap; gap: 10px; align-items: flex-end;",
            legend { style: "font-weight: 600; padding: 0 4px;", "{title}" }
            {fields.iter().map(|field| {
                let key = field.key.to_string();
                let current = values.read().get(field.key).cloned().unwrap_or_default();
                let input = match field.kind.clone() {
                    FieldKind::Text | FieldKind::Date => {
                        let input_type = if field.kind == FieldKind::Date { "date" } else { "text" };
                        rsx!(
                            input {
                                r#type: "{input_type}",
                                style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                                value: "{current}",
                                oninput: move |event| {
                                    values.write().insert(key.clone(), event.value());
                                },
                            }
                        )
                    }
                    FieldKind::Select(options) => rsx!(
                        select {
                            style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                            value: "{current}",
                            onchange: move |event| {
                                values.write().insert(key.clone(), event.value());
                            },
                            option { value: NONE_OPTION_VALUE, "(none)" }
                            {options.into_iter().map(|(value, label)| {
                                let selected = value == current;
                                rsx!(option { value: "{value}", selected: selected, "{label}" })
                            })}
                        }
                    ),
                };
                rsx!(
                    label {
                        key: "{field.key}",
                        style: "display: flex; flex-direction: column; gap: 4px; font-size: 12px; color: #555;",
                        "{field.label}"
                        {input}
                    }
                )
            })}
            button {
                style: "border: 1px solid #2563eb; background: #2563eb; color: #fff; padding: 5px 14px; border-radius: 6px; cursor: pointer;",
                onclick: move |_| {
                    let submitted = values();
                    let saved = on_submit.call(submitted.clone());
                    values.set(values_after_submit(saved, submitted, &initial));
                },
                "{submit_label}"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_optional_treats_blank_as_missing() {
        let mut values = HashMap::new();
        values.insert("a".to_string(), "  ".to_string());
        values.insert("b".to_string(), " x ".to_string());

        assert_eq!(form_optional(&values, "a"), None);
        assert_eq!(form_optional(&values, "b"), Some("x".to_string()));
        assert_eq!(form_optional(&values, "c"), None);
        assert_eq!(form_value(&values, "c"), "");
    }

    #[test]
    fn rejected_submit_keeps_typed_values() {
        let initial = HashMap::from([("site".to_string(), "s1".to_string())]);
        let typed = HashMap::from([
            ("site".to_string(), "s1".to_string()),
            ("due_date".to_string(), "2025-13-40".to_string()),
        ]);

        assert_eq!(values_after_submit(false, typed.clone(), &initial), typed);
        assert_eq!(values_after_submit(true, typed, &initial), initial);
    }
}
