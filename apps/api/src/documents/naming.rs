//! File names for rendered documents and uploads.

use chrono::NaiveDate;
use rand::Rng;

/// Reduces free text (client or candidate names) to a file-name-safe slug.
pub fn slug(text: &str) -> String {
    let slug: String = text
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '.') { c } else { '_' })
        .collect();
    if slug.is_empty() {
        "unnamed".to_string()
    } else {
        slug
    }
}

/// `Inv_{client}_{id}.html`. Unique because invoice ids are.
pub fn invoice_filename(client_name: &str, inv_id: i32) -> String {
    format!("Inv_{}_{}.html", slug(client_name), inv_id)
}

/// `WO_{client}_{candidate}_{date}_{NNNN}.html` with a random 4-digit suffix.
pub fn work_order_filename(
    client_name: &str,
    candidate_name: &str,
    txn_date: Option<NaiveDate>,
) -> String {
    let date = txn_date
        .map(|d| d.format("%Y%m%d").to_string())
        .unwrap_or_else(|| "undated".to_string());
    let disambiguator: u16 = rand::thread_rng().gen_range(1000..10000);
    format!(
        "WO_{}_{}_{}_{}.html",
        slug(client_name),
        slug(candidate_name),
        date,
        disambiguator
    )
}

/// Object key for an uploaded file: `{uuid}_{original name}`.
pub fn upload_key(original_name: &str) -> String {
    format!("{}_{}", uuid::Uuid::new_v4(), slug(original_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_replaces_unsafe_characters() {
        assert_eq!(slug("Acme Corp/EU"), "Acme_Corp_EU");
        assert_eq!(slug("cv.pdf"), "cv.pdf");
        assert_eq!(slug("   "), "unnamed");
    }

    #[test]
    fn test_invoice_filename() {
        assert_eq!(invoice_filename("Acme", 41), "Inv_Acme_41.html");
    }

    #[test]
    fn test_work_order_filename_shape() {
        let name =
            work_order_filename("Acme", "Ada Lovelace", NaiveDate::from_ymd_opt(2024, 1, 2));
        assert!(name.starts_with("WO_Acme_Ada_Lovelace_20240102_"));
        assert!(name.ends_with(".html"));
        let suffix = &name["WO_Acme_Ada_Lovelace_20240102_".len()..name.len() - ".html".len()];
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_upload_keys_are_unique() {
        assert_ne!(upload_key("cv.pdf"), upload_key("cv.pdf"));
    }
}
