// Chart renderer - One metric series per chart, straight from the data window
use crate::domain::chart::{ChartOptions, ChartRow, ChartTable};
use crate::domain::data_point::DataPoint;

/// Description of one chart: where it draws, how its column is labeled and
/// how its value is read out of a measurement.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: &'static str,
    pub container: &'static str,
    pub column: &'static str,
    pub extract: fn(&DataPoint) -> f64,
}

/// Build the 2-column table for one chart: row `i` is
/// `(timestamp_i, extract(data[i]))`. Input order is kept as-is; nothing
/// is filtered, deduplicated or interpolated, and non-finite extraction
/// results pass through untouched.
pub fn render(data: &[DataPoint], spec: &ChartSpec) -> ChartTable {
    let rows = data
        .iter()
        .map(|point| ChartRow {
            time_ms: point.timestamp,
            value: (spec.extract)(point),
        })
        .collect();

    ChartTable {
        title: spec.title.to_string(),
        container: spec.container.to_string(),
        column: spec.column.to_string(),
        options: ChartOptions::with_title(spec.title),
        rows,
    }
}

/// The six dimension-demo charts, in the order they redraw each cycle.
pub fn dimension_charts() -> Vec<ChartSpec> {
    vec![
        ChartSpec {
            title: "Cost Chart",
            container: "chart_div",
            column: "Cost",
            extract: |item| item.cost,
        },
        ChartSpec {
            title: "Revenue Chart",
            container: "chart1_div",
            column: "Revenue",
            extract: |item| item.revenue,
        },
        ChartSpec {
            title: "Clicks Chart",
            container: "chart2_div",
            column: "Clicks",
            extract: |item| item.clicks,
        },
        ChartSpec {
            title: "Impressions Chart",
            container: "chart3_div",
            column: "Impressions",
            extract: |item| item.impressions,
        },
        ChartSpec {
            title: "Ctr Chart",
            container: "chart4_div",
            column: "Ctr",
            extract: |item| item.clicks / item.impressions * 100.0,
        },
        ChartSpec {
            title: "Margin Chart",
            container: "chart5_div",
            column: "Margin",
            extract: |item| (item.cost - item.revenue) / item.revenue,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(timestamp: i64, cost: f64, revenue: f64, clicks: f64, impressions: f64) -> DataPoint {
        DataPoint {
            timestamp,
            cost,
            revenue,
            clicks,
            impressions,
        }
    }

    #[test]
    fn test_every_chart_renders_one_row_per_point_in_order() {
        let data = vec![
            point(30, 1.0, 2.0, 3.0, 4.0),
            point(10, 5.0, 6.0, 7.0, 8.0),
            point(20, 9.0, 10.0, 11.0, 12.0),
        ];

        for spec in dimension_charts() {
            let table = render(&data, &spec);
            assert_eq!(table.rows.len(), data.len(), "{}", spec.title);
            let times: Vec<i64> = table.rows.iter().map(|r| r.time_ms).collect();
            assert_eq!(times, vec![30, 10, 20], "{}", spec.title);
        }
    }

    #[test]
    fn test_chart_order_is_fixed() {
        let containers: Vec<&str> = dimension_charts().iter().map(|c| c.container).collect();
        assert_eq!(
            containers,
            vec![
                "chart_div",
                "chart1_div",
                "chart2_div",
                "chart3_div",
                "chart4_div",
                "chart5_div"
            ]
        );
    }

    #[test]
    fn test_derived_ratios() {
        let data = vec![point(0, 30.0, 20.0, 5.0, 200.0)];
        let charts = dimension_charts();

        let ctr = render(&data, &charts[4]);
        assert_eq!(ctr.rows[0].value, 2.5);

        let margin = render(&data, &charts[5]);
        assert_eq!(margin.rows[0].value, 0.5);
    }

    #[test]
    fn test_zero_denominators_pass_through_unguarded() {
        let data = vec![point(0, 10.0, 0.0, 5.0, 0.0)];
        let charts = dimension_charts();

        let ctr = render(&data, &charts[4]);
        assert_eq!(ctr.rows[0].value, f64::INFINITY);

        let margin = render(&data, &charts[5]);
        assert_eq!(margin.rows[0].value, f64::INFINITY);

        // 0/0 is NaN, still unclamped
        let data = vec![point(0, 0.0, 0.0, 0.0, 0.0)];
        let ctr = render(&data, &charts[4]);
        assert!(ctr.rows[0].value.is_nan());
    }

    #[test]
    fn test_empty_window_renders_empty_table() {
        let charts = dimension_charts();
        let table = render(&[], &charts[0]);
        assert!(table.rows.is_empty());
        assert_eq!(table.options.title, "Cost Chart");
    }
}
