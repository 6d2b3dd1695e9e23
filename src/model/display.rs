const NRK_IMAGE_HOST: &str = "gfx.nrk.no";

/// `"1t 5m"` from one hour up, `"42 min"` below. Empty for zero or unknown.
pub fn format_duration(seconds: Option<i64>) -> String {
    let seconds = match seconds {
        Some(s) if s > 0 => s,
        _ => return String::new(),
    };
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;
    if hours > 0 {
        format!("{hours}t {minutes}m")
    } else {
        format!("{minutes} min")
    }
}

/// NRK image URLs end in a width segment; swap it for the one we want.
pub fn sized_image_url(url: Option<&str>, width: u32) -> String {
    let url = match url {
        Some(u) if !u.is_empty() => u,
        _ => return String::new(),
    };
    if !url.contains(NRK_IMAGE_HOST) {
        return url.to_string();
    }
    match url.rsplit_once('/') {
        Some((base, last)) if !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) => {
            format!("{base}/{width}")
        }
        _ => url.to_string(),
    }
}
