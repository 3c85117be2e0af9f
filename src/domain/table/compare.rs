use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Numeric-aware ordering for cell text.
///
/// Runs of ASCII digits compare by value, so `"2"` sorts before `"10"` and
/// `"A2"` before `"A10"`. Everything else compares case-insensitively. Strings
/// that are equal under those rules fall back to plain byte order so the
/// result is a total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match folded_cmp(a, b) {
        Ordering::Equal => a.cmp(b),
        ordering => ordering,
    }
}

fn folded_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (l, r) = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => (l, r),
        };

        if l.is_ascii_digit() && r.is_ascii_digit() {
            let l_run = take_digits(&mut left);
            let r_run = take_digits(&mut right);
            match cmp_digit_runs(&l_run, &r_run) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }

        // A digit run facing a non-digit orders as its leading '0'.
        let l_key = if l.is_ascii_digit() { '0' } else { l };
        let r_key = if r.is_ascii_digit() { '0' } else { r };
        match l_key.to_lowercase().cmp(r_key.to_lowercase()) {
            Ordering::Equal => {
                left.next();
                right.next();
            }
            ordering => return ordering,
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: &[&str]) -> Vec<String> {
        let mut values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        values.sort_by(|a, b| natural_cmp(a, b));
        values
    }

    #[test]
    fn digit_runs_compare_by_value() {
        assert_eq!(sorted(&["2", "10", "1"]), vec!["1", "2", "10"]);
    }

    #[test]
    fn mixed_alphanumeric_orders_embedded_numbers() {
        assert_eq!(
            sorted(&["A10", "A2", "B1", "a3"]),
            vec!["A2", "a3", "A10", "B1"]
        );
    }

    #[test]
    fn letters_compare_case_insensitively() {
        assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(natural_cmp("Banana", "apple"), Ordering::Greater);
    }

    #[test]
    fn equal_folded_values_fall_back_to_byte_order() {
        assert_eq!(natural_cmp("Pump", "pump"), Ordering::Less);
        assert_eq!(natural_cmp("007", "7"), Ordering::Less);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn empty_text_sorts_first() {
        assert_eq!(sorted(&["b", "", "a"]), vec!["", "a", "b"]);
    }

    #[test]
    fn iso_dates_keep_chronological_order() {
        assert_eq!(
            sorted(&["2024-11-02", "2024-02-15", "2023-12-31"]),
            vec!["2023-12-31", "2024-02-15", "2024-11-02"]
        );
    }
}
