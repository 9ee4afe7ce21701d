pub mod dashboard_report;

use rust_xlsxwriter::{Format, FormatBorder};

/// Blue header #2C5F8A, white bold text, thin border.
pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("2C5F8A")
        .set_font_color("FFFFFF")
        .set_font_size(11)
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
}

pub fn create_date_format() -> Format {
    Format::new().set_num_format("dd/mm/yyyy")
}

/// Brazilian reais, `R$ #.##0,00` once Excel applies a pt_BR locale.
pub fn create_currency_format() -> Format {
    Format::new().set_num_format("\"R$\" #,##0.00")
}

pub fn create_integer_format() -> Format {
    Format::new().set_num_format("#,##0")
}
