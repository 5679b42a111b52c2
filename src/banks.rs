// Copyright (c) Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub const DEFAULT_CARD_COLOR: &str = "#7C3AED";

// Brand colors of the card issuers commonly seen in Brazilian wallets.
// Checked in order: exact name first, then substring shortcuts so
// "Banco Itaú S.A." still lands on the Itaú orange.
static BANK_COLORS: &[(&str, &str)] = &[
    ("itau", "#EC7000"),
    ("nubank", "#820AD1"),
    ("bradesco", "#CC092F"),
    ("santander", "#C40000"),
    ("bb", "#FFCC00"),
    ("banco do brasil", "#FFCC00"),
    ("caixa", "#005CA9"),
    ("inter", "#FF7A00"),
    ("original", "#00A859"),
    ("neon", "#00E6CC"),
    ("c6", "#222222"),
    ("credicard", "#0066CC"),
];

/// Lowercase, strip the diacritics bank names carry in pt-BR, trim.
fn normalize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Accepts "#RGB" and "#RRGGBB".
pub fn valid_hex_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Default card color for a bank, falling back to a neutral violet.
pub fn color_for(bank: &str) -> &'static str {
    let key = normalize(bank);
    for (name, color) in BANK_COLORS {
        if key == *name {
            return color;
        }
    }
    // "bb" is too short to be a safe substring
    for (name, color) in BANK_COLORS {
        if *name != "bb" && key.contains(name) {
            return color;
        }
    }
    DEFAULT_CARD_COLOR
}
