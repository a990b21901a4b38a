//! Cart line bookkeeping shared by `Cart` and `CartStore`.

use super::models::CartLine;

/// Adds `incoming` to `lines`.
///
/// A code already in the cart only gains quantity (saturating at `u32::MAX`);
/// its name, price and image keep the values from when it was first added.
/// Unknown codes go to the end, so lines stay in the order they were added.
pub fn merge_line(lines: &mut Vec<CartLine>, incoming: CartLine) {
    if let Some(existing) = lines.iter_mut().find(|l| l.item_code == incoming.item_code) {
        existing.quantity = existing.quantity.saturating_add(incoming.quantity);
    } else {
        lines.push(incoming);
    }
}

/// `quantity x name` for every line, comma separated, for log fields such as
/// `2x Ghee, 1x Basmati Rice`.
pub fn format_line_summary(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(|l| format!("{}x {}", l.quantity, l.item_name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(code: &str, name: &str, quantity: u32) -> CartLine {
        CartLine {
            item_code: code.into(),
            item_name: name.into(),
            unit_price: 1.0,
            currency: "LKR".into(),
            quantity,
            image_url: String::new(),
        }
    }

    #[test]
    fn merge_keeps_order_and_first_line_details() {
        let mut lines = vec![line("G1", "Ghee", 1), line("R5", "Rice", 1)];
        merge_line(&mut lines, line("G1", "Renamed", 2));
        merge_line(&mut lines, line("T9", "Tea", 1));

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].item_name, "Ghee");
        assert_eq!(lines[2].item_code, "T9");

        merge_line(&mut lines, line("T9", "Tea", u32::MAX));
        assert_eq!(lines[2].quantity, u32::MAX);
    }

    #[test]
    fn summary_lists_quantities_and_names() {
        let lines = vec![line("G1", "Ghee", 2), line("R5", "Basmati Rice", 1)];
        assert_eq!(format_line_summary(&lines), "2x Ghee, 1x Basmati Rice");
    }
}
