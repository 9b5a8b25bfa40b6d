use super::fixtures::{self, markup};
use crate::parsers::extract_fields;
use crate::results::ListingRecord;
use scraper::{Html, Selector};

fn extract_single(fragment_html: &str) -> ListingRecord {
    let markup = markup();
    let doc = Html::parse_fragment(fragment_html);
    let selector = Selector::parse("div.inzeraty").unwrap();
    let fragment = doc.select(&selector).next().expect("fragment present");
    extract_fields(&markup, fragment)
}

#[test]
fn test_extract_all_fields() {
    let record = extract_single(&fixtures::listing(
        101,
        "  Prodej bytu 2+kk 54 m² ",
        "Světlý byt po rekonstrukci,\n   blízko metra.",
        Some("4 590 000 Kč"),
        Some("Praha 4<br>140 00"),
    ));

    assert_eq!(
        record,
        ListingRecord {
            link: Some("https://reality.bazos.cz/inzerat/101/byt.php".to_string()),
            title: Some("Prodej bytu 2+kk 54 m²".to_string()),
            description: Some("Světlý byt po rekonstrukci, blízko metra.".to_string()),
            price: Some("4 590 000".to_string()),
            location: Some("Praha 4, 140 00".to_string()),
        }
    );
}

#[test]
fn test_missing_price_only() {
    let record = extract_single(&fixtures::listing(
        7,
        "Byt 3+1",
        "Popis",
        None,
        Some("Brno<br>602 00"),
    ));

    assert_eq!(record.price, None);
    assert_eq!(record.title.as_deref(), Some("Byt 3+1"));
    assert_eq!(record.description.as_deref(), Some("Popis"));
    assert_eq!(record.location.as_deref(), Some("Brno, 602 00"));
    assert_eq!(record.missing_fields(), vec!["price"]);
}

#[test]
fn test_missing_price_and_location() {
    let record = extract_single(&fixtures::listing(8, "Byt", "Popis", None, None));

    assert_eq!(record.price, None);
    assert_eq!(record.location, None);
    assert_eq!(
        record.link.as_deref(),
        Some("https://reality.bazos.cz/inzerat/8/byt.php")
    );
    assert_eq!(record.title.as_deref(), Some("Byt"));
    assert_eq!(record.description.as_deref(), Some("Popis"));
}

#[test]
fn test_missing_location_keeps_price() {
    let record = extract_single(&fixtures::listing(9, "Byt", "Popis", Some("Dohodou"), None));

    assert_eq!(record.price.as_deref(), Some("Dohodou"));
    assert_eq!(record.location, None);
}

#[test]
fn test_bare_fragment_has_every_field_absent() {
    let record = extract_single(r#"<div class="inzeraty inzeratyflex"><span>reklama</span></div>"#);
    assert_eq!(record, ListingRecord::default());
}

#[test]
fn test_anchor_without_href_is_absent_link() {
    let record = extract_single(
        r#"<div class="inzeraty inzeratyflex"><a name="top">x</a><h2>Byt</h2></div>"#,
    );
    assert_eq!(record.link, None);
    assert_eq!(record.title.as_deref(), Some("Byt"));
}

#[test]
fn test_absolute_href_is_kept() {
    let record = extract_single(
        r#"<div class="inzeraty inzeratyflex"><a href=" https://byty.bazos.cz/inzerat/5/x.php ">x</a></div>"#,
    );
    assert_eq!(
        record.link.as_deref(),
        Some("https://byty.bazos.cz/inzerat/5/x.php")
    );
}

#[test]
fn test_empty_title_is_present_not_absent() {
    let record = extract_single(r#"<div class="inzeraty inzeratyflex"><h2>   </h2></div>"#);
    assert_eq!(record.title.as_deref(), Some(""));
}

#[test]
fn test_extract_fields_is_idempotent() {
    let html = fixtures::listing(11, "Byt", "Popis", Some("10 Kč"), Some("Kolín<br>280 02"));
    assert_eq!(extract_single(&html), extract_single(&html));
}
