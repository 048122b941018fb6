use axum::response::Html;

const TIME_CONVERTER: &str = include_str!("../../static/time_converter.html");

/// `GET /time-converter`
pub async fn time_converter() -> Html<&'static str> {
    Html(TIME_CONVERTER)
}
