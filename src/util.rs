pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("Lat: {latitude:.4}, Lon: {longitude:.4}")
}

pub fn format_distance(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{value:.2}")
    } else {
        format!("{value:.2} {unit}")
    }
}
