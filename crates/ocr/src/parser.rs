//! Turns raw receipt text into `{ name, price }` candidates.
//!
//! Receipts are matched line by line against a list of common layouts. A
//! line that matches nothing still gets a last chance: the text before the
//! first price marker becomes the name and the first number the price.

use std::sync::LazyLock;

use engine::ExtractedItem;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Lines holding any of these are store headers or payment footers.
const HEADER_FOOTER_KEYWORDS: &[&str] = &[
    "交易日期",
    "店名",
    "電話",
    "地址",
    "機台",
    "序號",
    "合計",
    "發票號碼",
    "隨機碼",
    "LinePay",
    "代收",
];

/// Names containing any of these (case-insensitive) are not goods.
const RECEIPT_KEYWORDS: &[&str] = &[
    "total",
    "subtotal",
    "tax",
    "tip",
    "change",
    "cash",
    "credit",
    "debit",
    "visa",
    "mastercard",
    "amex",
    "discover",
    "receipt",
    "thank you",
    "date",
    "time",
    "store",
    "location",
    "phone",
    "address",
    "qty",
    "quantity",
    "balance",
    "payment",
    "tender",
];

const MAX_PRICE: f64 = 10_000.0;

fn regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => panic!("invalid receipt pattern {pattern}: {err}"),
    }
}

/// Layouts where the name comes first: group 1 is the name, group 2 the price.
static NAME_FIRST: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // `紅茶 $35TX`, `紅茶 35TX`
        r"^(.+?)\s+\$?([0-9]+)TX$",
        // `紅茶 $35 *`
        r"^(.+?)\s+\$([0-9]+)\s*\*.*$",
        // `Latte $4.50`, `Latte    4.50`, `Latte ...... 4.50`
        r"^(.+?)\s*[.\s]+\s*\$?([0-9]+\.[0-9]{2})$",
        // `Latte: 4.50`
        r"^(.+?):\s*\$?([0-9]+\.[0-9]{2})$",
        // `Latte - 4.50`
        r"^(.+?)\s*-\s*\$?([0-9]+\.[0-9]{2})$",
    ]
    .into_iter()
    .map(regex)
    .collect()
});

/// `4.50 Latte`: group 1 is the price, group 2 the name.
static PRICE_FIRST: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^\$?([0-9]+\.[0-9]{2})\s+(.+)$"));

static FALLBACK_PRICE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\$?([0-9]+)(?:\.[0-9]{2})?\s*\*?"));

/// Promotion marker printed before discounted goods.
static SPECIAL_OFFER: LazyLock<Regex> = LazyLock::new(|| regex(r"^1\s+特價\s+"));

static QUANTITY_PREFIX: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)^[0-9]+\s*x?\s*"));
static UNIT_PRICE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\s*@\s*\$?[0-9]+\.[0-9]{2}.*$"));
static EACH_SUFFIX: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\s+(?:each|ea)\.?\s*$"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| regex(r"\s+"));
static TRAILING_PUNCT: LazyLock<Regex> = LazyLock::new(|| regex(r"[:-]+$"));

/// Extracts priced items from recognized receipt text, in reading order.
///
/// The text is NFKC-normalized first so full-width digits and symbols
/// (`１２０`, `＄`) match like their ASCII forms.
#[must_use]
pub fn parse_receipt_text(text: &str) -> Vec<ExtractedItem> {
    let text: String = text.nfkc().collect();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_header_or_footer(line))
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<ExtractedItem> {
    for pattern in NAME_FIRST.iter() {
        if let Some(caps) = pattern.captures(line) {
            if let Some(item) = candidate(&caps[1], &caps[2]) {
                return Some(item);
            }
        }
    }

    if let Some(caps) = PRICE_FIRST.captures(line) {
        if let Some(item) = candidate(&caps[2], &caps[1]) {
            return Some(item);
        }
    }

    let price = FALLBACK_PRICE.captures(line)?;
    let start = price.get(0)?.start();
    let name = SPECIAL_OFFER.replace(&line[..start], "");
    candidate(&name, &price[1])
}

fn candidate(name: &str, price: &str) -> Option<ExtractedItem> {
    let name = name.trim();
    let price: f64 = price.parse().ok()?;
    is_valid_item(name, price).then(|| ExtractedItem {
        name: clean_item_name(name),
        price,
    })
}

fn is_header_or_footer(line: &str) -> bool {
    HEADER_FOOTER_KEYWORDS
        .iter()
        .any(|keyword| line.contains(keyword))
}

fn is_valid_item(name: &str, price: f64) -> bool {
    let len = name.chars().count();
    len > 1 && len < 100 && price > 0.0 && price < MAX_PRICE && !is_receipt_keyword(name)
}

fn is_receipt_keyword(text: &str) -> bool {
    let text = text.to_lowercase();
    RECEIPT_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

/// Strips quantities, unit prices and punctuation around an item name.
fn clean_item_name(name: &str) -> String {
    let name = QUANTITY_PREFIX.replace(name, "");
    let name = UNIT_PRICE_SUFFIX.replace(&name, "");
    let name = EACH_SUFFIX.replace(&name, "");
    let name = SPACES.replace_all(&name, " ");
    let name = TRAILING_PUNCT.replace(&name, "");
    name.trim().to_string()
}
