mod short_url;

pub use short_url::{BatchValidation, ClickEvent, RowErrors, ShortUrl, ShortUrlView, UrlFormRow};
