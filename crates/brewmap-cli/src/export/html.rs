//! Static HTML site: one page per enriched place, grouped by city, plus an
//! `index.html` linking them all.
//!
//! Layout under the output directory:
//!
//! ```text
//! index.html
//! <City>/<Safe_Name>.html
//! <City>/images/<Safe_Name>_<n>.jpg
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::Context;
use brewmap_core::{EnrichedRecord, Language, PlaceDetails};
use chrono::{DateTime, Utc};

const UNKNOWN_CITY: &str = "Unknown_City";

/// What [`write_html_site`] produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct HtmlSummary {
    pub pages: usize,
    /// City folder names, sorted.
    pub cities: Vec<String>,
}

/// One rendered page, remembered for the index.
struct PageLink {
    href: String,
    name: String,
    address: Option<String>,
    rating: Option<f64>,
}

/// Escapes text for safe interpolation into element content and
/// double-quoted attribute values.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Keeps alphanumerics, spaces, `-` and `_`, then turns spaces into `_`.
fn folder_safe(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

/// File-system-safe stem for a place name. Never empty.
pub(crate) fn safe_name(name: &str) -> String {
    let safe = folder_safe(name);
    if safe.is_empty() {
        "Unnamed_Place".to_owned()
    } else {
        safe
    }
}

/// Guesses the city folder from a formatted address.
///
/// Takes the first comma-separated part (excluding the last, usually the
/// country) whose first three characters hold no digit and that cleans to
/// more than two characters. Falls back to any non-numeric part, then to
/// `Unknown_City`.
pub(crate) fn city_from_address(address: Option<&str>) -> String {
    let Some(address) = address.filter(|a| !a.trim().is_empty()) else {
        return UNKNOWN_CITY.to_owned();
    };
    let parts: Vec<&str> = address.split(',').map(str::trim).collect();

    if parts.len() >= 2 {
        for part in &parts[..parts.len() - 1] {
            if part.chars().take(3).any(|c| c.is_ascii_digit()) {
                continue;
            }
            let city = folder_safe(part);
            if city.chars().count() > 2 {
                return city;
            }
        }
    }

    parts
        .iter()
        .map(|part| folder_safe(part))
        .find(|clean| clean.chars().count() > 2 && !clean.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or_else(|| UNKNOWN_CITY.to_owned())
}

/// Writes pages, images and the index for every record that has place data.
///
/// Records whose lookup failed are skipped. Name collisions within a city
/// get a numeric suffix.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be written.
pub(crate) fn write_html_site(
    out_dir: &Path,
    records: &[EnrichedRecord],
    generated_at: DateTime<Utc>,
) -> anyhow::Result<HtmlSummary> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut by_city: BTreeMap<String, Vec<PageLink>> = BTreeMap::new();
    let mut used_stems: HashSet<(String, String)> = HashSet::new();

    for record in records {
        let Some(place) = record.place.as_ref() else {
            continue;
        };

        let city = city_from_address(place.formatted_address.as_deref());
        let city_dir = out_dir.join(&city);
        std::fs::create_dir_all(&city_dir)
            .with_context(|| format!("failed to create {}", city_dir.display()))?;

        let base = safe_name(record.display_name());
        let mut stem = base.clone();
        let mut suffix = 2;
        while !used_stems.insert((city.clone(), stem.clone())) {
            stem = format!("{base}_{suffix}");
            suffix += 1;
        }

        let image_paths = write_images(&city_dir, &stem, record)?;
        let page = render_place_page(record, place, &image_paths);
        let page_path = city_dir.join(format!("{stem}.html"));
        std::fs::write(&page_path, page)
            .with_context(|| format!("failed to write {}", page_path.display()))?;
        tracing::debug!(path = %page_path.display(), images = image_paths.len(), "wrote HTML page");

        by_city.entry(city.clone()).or_default().push(PageLink {
            href: format!("{city}/{stem}.html"),
            name: record.display_name().to_owned(),
            address: place.formatted_address.clone(),
            rating: place.rating,
        });
    }

    let index_path = out_dir.join("index.html");
    std::fs::write(&index_path, render_index(&by_city, generated_at))
        .with_context(|| format!("failed to write {}", index_path.display()))?;

    Ok(HtmlSummary {
        pages: by_city.values().map(Vec::len).sum(),
        cities: by_city.into_keys().collect(),
    })
}

/// Writes downloaded photos to `<city>/images/` and returns page-relative paths.
fn write_images(city_dir: &Path, stem: &str, record: &EnrichedRecord) -> anyhow::Result<Vec<String>> {
    if record.photos.is_empty() {
        return Ok(Vec::new());
    }
    let images_dir = city_dir.join("images");
    std::fs::create_dir_all(&images_dir)
        .with_context(|| format!("failed to create {}", images_dir.display()))?;

    let mut paths = Vec::with_capacity(record.photos.len());
    for (i, photo) in record.photos.iter().enumerate() {
        let filename = format!("{stem}_{}.jpg", i + 1);
        let path = images_dir.join(&filename);
        std::fs::write(&path, &photo.bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        paths.push(format!("images/{filename}"));
    }
    Ok(paths)
}

const PAGE_STYLE: &str = "body{font-family:'Segoe UI',Tahoma,Geneva,Verdana,sans-serif;\
max-width:800px;margin:0 auto;padding:20px;line-height:1.6;color:#333;background:#f9f9f9}\
.container{background:#fff;padding:30px;border-radius:10px;box-shadow:0 2px 10px rgba(0,0,0,.1)}\
h1{color:#2c3e50;border-bottom:3px solid #3498db;padding-bottom:10px}\
.rating{font-size:1.2em;color:#f39c12}\
.address{background:#ecf0f1;padding:10px;border-radius:5px}\
.photo-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(200px,1fr));gap:15px}\
.photo{width:100%;height:200px;object-fit:cover;border-radius:8px}\
.review-block{background:#f8f9fa;padding:20px;border-radius:8px;border-left:4px solid #3498db}\
.hours-section ul{list-style:none;padding:0}\
.hours-section li{background:#ecf0f1;padding:8px 12px;margin:5px 0;border-radius:4px}";

fn rating_line(place: &PlaceDetails) -> String {
    match place.rating {
        Some(rating) => format!(
            "⭐ {rating}/5 ({} reviews)",
            place.user_ratings_total.unwrap_or(0)
        ),
        None => "⭐ N/A".to_owned(),
    }
}

fn render_place_page(record: &EnrichedRecord, place: &PlaceDetails, image_paths: &[String]) -> String {
    let name = escape_html(record.display_name());
    let address = escape_html(
        place
            .formatted_address
            .as_deref()
            .unwrap_or("Address not available"),
    );

    let mut body = String::new();

    if place.phone.is_some() || place.website.is_some() {
        body.push_str("<div class=\"contact-section\">\n<h3>📞 Contact</h3>\n");
        if let Some(phone) = &place.phone {
            body.push_str(&format!("<p><strong>Phone:</strong> {}</p>\n", escape_html(phone)));
        }
        if let Some(website) = &place.website {
            let website = escape_html(website);
            body.push_str(&format!(
                "<p><strong>Website:</strong> <a href=\"{website}\" target=\"_blank\">{website}</a></p>\n"
            ));
        }
        body.push_str("</div>\n");
    }

    if let Some(hours) = place.opening_hours.as_ref().filter(|h| !h.weekday_text.is_empty()) {
        body.push_str("<div class=\"hours-section\">\n<h3>⏰ Opening Hours</h3>\n<ul>\n");
        for day in &hours.weekday_text {
            body.push_str(&format!("<li>{}</li>\n", escape_html(day)));
        }
        body.push_str("</ul>\n</div>\n");
    }

    if !record.reviews.is_empty() {
        body.push_str("<div class=\"reviews-section\">\n<h3>📝 Work &amp; Study Review</h3>\n");
        for language in Language::ALL {
            if let Some(text) = record.review(language) {
                body.push_str(&format!(
                    "<div class=\"review-block\" lang=\"{}\">\n<h4>{}</h4>\n<p>{}</p>\n</div>\n",
                    language.code(),
                    language.display_name(),
                    escape_html(text)
                ));
            }
        }
        body.push_str("</div>\n");
    }

    if !image_paths.is_empty() {
        body.push_str("<div class=\"photos-section\">\n<h3>📸 Photos</h3>\n<div class=\"photo-grid\">\n");
        for (i, src) in image_paths.iter().enumerate() {
            body.push_str(&format!(
                "<img src=\"{}\" alt=\"Photo {}\" class=\"photo\">\n",
                escape_html(src),
                i + 1
            ));
        }
        body.push_str("</div>\n</div>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{name}</title>\n<style>{PAGE_STYLE}</style>\n</head>\n<body>\n\
         <div class=\"container\">\n<h1>☕ {name}</h1>\n\
         <div class=\"rating\">{rating}</div>\n<div class=\"address\">📍 {address}</div>\n\
         {body}</div>\n</body>\n</html>\n",
        rating = escape_html(&rating_line(place)),
    )
}

const INDEX_STYLE: &str = "body{font-family:'Segoe UI',Tahoma,Geneva,Verdana,sans-serif;\
max-width:1200px;margin:0 auto;padding:20px;line-height:1.6;color:#333;background:#f9f9f9}\
.container{background:#fff;padding:30px;border-radius:10px}\
h1{text-align:center;color:#2c3e50;border-bottom:3px solid #3498db;padding-bottom:10px}\
.shop-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(300px,1fr));gap:20px}\
.shop-card{background:#f8f9fa;padding:20px;border-radius:8px;border:1px solid #e9ecef}\
.cities-nav a{margin-right:15px;padding:5px 10px;border-radius:4px;background:#fff}\
.address{color:#7f8c8d;font-size:.9em}.rating{color:#f39c12;font-weight:bold}";

fn render_index(by_city: &BTreeMap<String, Vec<PageLink>>, generated_at: DateTime<Utc>) -> String {
    let total: usize = by_city.values().map(Vec::len).sum();

    let mut nav = String::new();
    for city in by_city.keys() {
        nav.push_str(&format!(
            "<a href=\"#{}\">{}</a> ",
            escape_html(city),
            escape_html(&city.replace('_', " "))
        ));
    }

    let mut sections = String::new();
    for (city, links) in by_city {
        sections.push_str(&format!(
            "<div class=\"city-section\" id=\"{}\">\n<h2>📍 {} ({} coffee shops)</h2>\n<div class=\"shop-grid\">\n",
            escape_html(city),
            escape_html(&city.replace('_', " ")),
            links.len()
        ));
        for link in links {
            let rating = link
                .rating
                .map_or_else(|| "N/A".to_owned(), |r| r.to_string());
            sections.push_str(&format!(
                "<div class=\"shop-card\">\n<h3><a href=\"{}\">{}</a></h3>\n\
                 <p class=\"address\">📍 {}</p>\n<p class=\"rating\">⭐ {}/5</p>\n</div>\n",
                escape_html(&link.href),
                escape_html(&link.name),
                escape_html(link.address.as_deref().unwrap_or("Address not available")),
                rating
            ));
        }
        sections.push_str("</div>\n</div>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>Coffee Shops Directory</title>\n<style>{INDEX_STYLE}</style>\n</head>\n<body>\n\
         <div class=\"container\">\n<h1>☕ Coffee Shops Directory</h1>\n\
         <p class=\"summary\"><strong>{total} coffee shops</strong> across <strong>{cities} cities</strong></p>\n\
         <div class=\"cities-nav\">{nav}</div>\n{sections}\
         <footer>Generated {generated}</footer>\n</div>\n</body>\n</html>\n",
        cities = by_city.len(),
        generated = generated_at.format("%Y-%m-%d %H:%M UTC"),
    )
}
