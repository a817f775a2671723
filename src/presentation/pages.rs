// Embedded HTML pages for the demo dashboards
use crate::domain::page::PageParameters;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 1.5rem; color: #1e293b; }
h1 { font-size: 1.4rem; }
h2 { font-size: 1.2rem; }
nav a { margin-right: 1rem; }
form { margin: 1rem 0; }
form label { margin-right: 1rem; }
input { width: 4rem; }
#status { color: #b91c1c; }
ul.demos li { margin: 0.4rem 0; }
"#;

/// Client half of the dimensions page: redraw the latest server-rendered
/// tables on an interval. `$refresh_ms` is substituted at render time.
const DIMENSIONS_SCRIPT: &str = r#"
google.charts.load('current', {packages: ['corechart']});
google.charts.setOnLoadCallback(refresh);

function refresh() {
    fetch('charts')
        .then(function(response) { return response.json(); })
        .then(function(snapshot) {
            snapshot.charts.forEach(draw);
            if (snapshot.status === 'halted') {
                document.getElementById('status').textContent =
                    'polling halted: ' + (snapshot.error || '');
                return;
            }
            setTimeout(refresh, $refresh_ms);
        });
}

function draw(chart) {
    var table = new google.visualization.DataTable();
    table.addColumn('datetime', 'Time');
    table.addColumn('number', chart.column);
    chart.rows.forEach(function(row) {
        table.addRow([new Date(row.time), row.value]);
    });
    var surface = new google.visualization.ScatterChart(
        document.getElementById(chart.container));
    surface.draw(table, chart.options);
}
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Demos</a></nav>\n{body}\n</body>\n</html>\n"
    )
}

pub fn index_page() -> String {
    let body = "<h1>Demo Dashboards</h1>\n<ul class=\"demos\">\n\
        <li><a href=\"/twitter/main\">Twitter Feed Demo</a></li>\n\
        <li><a href=\"/mobile/main\">Mobile Demo</a></li>\n\
        <li><a href=\"/dimensions/main\">Ads Dimensions Demo</a></li>\n\
        <li><a href=\"/siteops/main\">Site Operations Demo</a></li>\n\
        <li><a href=\"/machine/main\">Machine Generated Data Demo</a></li>\n\
        </ul>";
    layout("Demo Dashboards", body)
}

/// Synthetic filter options: `<Label> <i>` for `i` in `[0, count)`, with
/// the requested value marked selected when it is one of them.
fn select_options(label: &str, count: usize, selected: Option<&str>) -> String {
    let mut html = String::new();
    for i in 0..count {
        let marker = if selected == Some(i.to_string().as_str()) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{i}\"{marker}>{label} {i}</option>"
        ));
    }
    html
}

fn select(id: &str, label: &str, count: usize, selected: Option<&str>) -> String {
    format!(
        "<label>{label} <select id=\"{id}\" name=\"{id}\">\
         <option value=\"\"></option>{options}</select></label>",
        options = select_options(label, count, selected.filter(|s| !s.is_empty())),
    )
}

pub fn dimensions_page(params: &PageParameters) -> String {
    let form = format!(
        "<form method=\"get\" action=\"main\">\n{publisher}\n{advertiser}\n{adunit}\n\
         <label>Refresh Interval (secs) <input id=\"refresh\" name=\"refresh\" value=\"{refresh}\"></label>\n\
         <label>Look Back (hours) <input id=\"lookback\" name=\"lookback\" value=\"{lookback}\"></label>\n\
         <input type=\"submit\" value=\"Reload\">\n</form>",
        publisher = select("publisher", "Publisher", 50, params.publisher.as_deref()),
        advertiser = select("advertiser", "Advertiser", 100, params.advertiser.as_deref()),
        adunit = select("adunit", "Ad Unit", 5, params.adunit.as_deref()),
        refresh = params.refresh_seconds,
        lookback = params.lookback_hours,
    );

    let script = DIMENSIONS_SCRIPT.replace(
        "$refresh_ms",
        &(params.refresh_seconds.saturating_mul(1000)).to_string(),
    );

    let body = format!(
        "<h1>Ads Dimensions Demo</h1>\n{form}\n<p id=\"status\"></p>\n\
         <div id=\"chart_div\"></div>\n<div id=\"chart1_div\"></div>\n\
         <div id=\"chart2_div\"></div>\n<div id=\"chart3_div\"></div>\n\
         <div id=\"chart4_div\"></div>\n<div id=\"chart5_div\"></div>\n\
         <script src=\"https://www.gstatic.com/charts/loader.js\"></script>\n\
         <script>{script}</script>"
    );

    layout("Ads Dimensions Demo", &body)
}

/// Placeholder page for the demos whose charts still live in per-demo
/// client scripts; lists the JSON endpoints this server exposes for them.
pub fn demo_page(title: &str, endpoints: &[&str]) -> String {
    let mut body = format!("<h1>{title}</h1>\n");
    if endpoints.is_empty() {
        body.push_str("<p>This demo has no data endpoints on this server.</p>");
    } else {
        body.push_str("<p>Data endpoints:</p>\n<ul>\n");
        for endpoint in endpoints {
            body.push_str(&format!("<li><a href=\"{endpoint}\">{endpoint}</a></li>\n"));
        }
        body.push_str("</ul>");
    }
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_lists_have_fixed_sizes_and_labels() {
        let options = select_options("Publisher", 50, None);
        assert_eq!(options.matches("</option>").count(), 50);
        assert!(options.starts_with("<option value=\"0\">Publisher 0</option>"));
        assert!(options.ends_with("<option value=\"49\">Publisher 49</option>"));

        let page = dimensions_page(&PageParameters::default());
        assert!(page.contains("<option value=\"99\">Advertiser 99</option>"));
        assert!(page.contains("<option value=\"4\">Ad Unit 4</option>"));
        assert!(!page.contains(">Ad Unit 5<"));
        assert!(!page.contains(">Advertiser 100<"));
    }

    #[test]
    fn test_parameters_seed_the_form_controls() {
        let params = PageParameters::from_query("publisher=3&refresh=10&lookback=6");
        let page = dimensions_page(&params);
        assert!(page.contains("<option value=\"3\" selected>Publisher 3</option>"));
        assert!(page.contains("id=\"refresh\" name=\"refresh\" value=\"10\""));
        assert!(page.contains("id=\"lookback\" name=\"lookback\" value=\"6\""));
    }

    #[test]
    fn test_defaults_seed_the_form_controls() {
        let page = dimensions_page(&PageParameters::default());
        assert!(page.contains("value=\"30\""));
        assert!(page.contains("value=\"2\""));
        assert!(!page.contains(" selected"));
    }

    #[test]
    fn test_chart_containers_and_refresh_interval_are_embedded() {
        let params = PageParameters::from_query("refresh=5");
        let page = dimensions_page(&params);
        for container in [
            "chart_div",
            "chart1_div",
            "chart2_div",
            "chart3_div",
            "chart4_div",
            "chart5_div",
        ] {
            assert!(page.contains(&format!("<div id=\"{container}\"></div>")));
        }
        assert!(page.contains("setTimeout(refresh, 5000)"));
    }

    #[test]
    fn test_index_links_every_demo() {
        let page = index_page();
        for demo in ["twitter", "mobile", "dimensions", "siteops", "machine"] {
            assert!(page.contains(&format!("/{demo}/main")));
        }
    }
}
