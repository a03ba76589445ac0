//! HTML report page assembly.

use crate::models::{ForecastReport, ModelMetrics};

/// Public Tableau dashboard embedded at the top of every report.
pub const TABLEAU_EMBED: &str = r#"
<div class='tableauPlaceholder' id='viz1729614426279' style='position: relative'>
    <noscript><a href='#'><img alt=' ' src='https://public.tableau.com/static/images/Bi/BirdStrikesUSA/Dashboard1/1_rss.png' style='border: none' /></a></noscript>
    <object class='tableauViz' style='display:none;'>
        <param name='host_url' value='https%3A%2F%2Fpublic.tableau.com%2F' />
        <param name='embed_code_version' value='3' />
        <param name='site_root' value='' />
        <param name='name' value='BirdStrikesUSA/Dashboard1' />
        <param name='tabs' value='yes' />
        <param name='toolbar' value='yes' />
        <param name='static_image' value='https://public.tableau.com/static/images/Bi/BirdStrikesUSA/Dashboard1/1.png' />
        <param name='animate_transition' value='yes' />
        <param name='display_static_image' value='yes' />
        <param name='display_spinner' value='yes' />
        <param name='display_overlay' value='yes' />
        <param name='display_count' value='yes' />
        <param name='language' value='en-US' />
        <param name='filter' value='fullscreen=yes' />
    </object>
</div>
<script type='text/javascript'>
    var divElement = document.getElementById('viz1729614426279');
    var vizElement = divElement.getElementsByTagName('object')[0];
    if (divElement.offsetWidth > 800) {
        vizElement.style.minWidth='1366px';vizElement.style.maxWidth='100%';vizElement.style.minHeight='818px';vizElement.style.maxHeight=(divElement.offsetWidth*0.75)+'px';
    } else if (divElement.offsetWidth > 500) {
        vizElement.style.minWidth='1366px';vizElement.style.maxWidth='100%';vizElement.style.minHeight='818px';vizElement.style.maxHeight=(divElement.offsetWidth*0.75)+'px';
    } else {
        vizElement.style.width='100%';vizElement.style.minHeight='2250px';vizElement.style.maxHeight=(divElement.offsetWidth*1.77)+'px';
    }
    var scriptElement = document.createElement('script');
    scriptElement.src = 'https://public.tableau.com/javascripts/api/viz_v1.js';
    vizElement.parentNode.insertBefore(scriptElement, vizElement);
</script>
"#;

/// Upload form served at `/`.
pub const UPLOAD_PAGE: &str = include_str!("../../templates/upload.html");

/// The "Model Statistics" fragment.
pub fn stats_html(metrics: &ModelMetrics) -> String {
    format!(
        r#"
    <h2>Model Statistics</h2>
    <ul>
        <li>Mean Absolute Error (MAE): {:.2}</li>
        <li>Mean Squared Error (MSE): {:.2}</li>
        <li>R-squared (R²): {:.2}</li>
    </ul>
    "#,
        metrics.mae, metrics.mse, metrics.r2
    )
}

/// Short summary of the data behind the model, shown under the statistics.
fn summary_html(report: &ForecastReport) -> String {
    let range = match (report.series.first_date(), report.series.last_date()) {
        (Some(first), Some(last)) => format!("{} to {}", first, last),
        _ => "no dates".to_string(),
    };
    format!(
        "<p>{} incidents on {} days ({}); {} rows without a valid date were skipped. \
         Trained on {} days, tested on {}.</p>",
        report.series.total(),
        report.series.len(),
        range,
        report.dropped_rows,
        report.train_size,
        report.test_size
    )
}

/// Full report document: dashboard embed, statistics, then the chart fragments.
pub fn render_page(report: &ForecastReport, charts: &[String]) -> String {
    let figures_html: String = charts
        .iter()
        .map(|svg| format!("<div class=\"chart\">{}</div>\n", svg))
        .collect();

    format!(
        r#"
    <!DOCTYPE html>
    <html lang="en">
    <head>
        <meta charset="UTF-8">
        <meta name="viewport" content="width=device-width, initial-scale=1.0">
        <title>Visualizations</title>
    </head>
    <body>
        <h1>Visualizations</h1>
        <h2>-</h2>
        {embed}
        <br>
        {stats}
        {summary}
        <br>
        {figures}
        <br>
        <a href="/">Upload another file</a>
    </body>
    </html>
    "#,
        embed = TABLEAU_EMBED,
        stats = stats_html(&report.metrics),
        summary = summary_html(report),
        figures = figures_html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailySeries;

    fn report(metrics: ModelMetrics) -> ForecastReport {
        ForecastReport {
            series: DailySeries::default(),
            metrics,
            forecast: vec![],
            categories: vec![],
            train_size: 4,
            test_size: 1,
            dropped_rows: 2,
        }
    }

    #[test]
    fn test_stats_two_decimals() {
        let html = stats_html(&ModelMetrics {
            mae: 1.23456,
            mse: 2.0,
            r2: -0.5,
        });
        assert!(html.contains("Mean Absolute Error (MAE): 1.23"));
        assert!(html.contains("Mean Squared Error (MSE): 2.00"));
        assert!(html.contains("R-squared (R²): -0.50"));
    }

    #[test]
    fn test_page_layout_order() {
        let r = report(ModelMetrics {
            mae: 0.0,
            mse: 0.0,
            r2: f64::NAN,
        });
        let page = render_page(&r, &["<svg id=\"a\"></svg>".to_string()]);

        let embed = page.find("tableauPlaceholder").unwrap();
        let stats = page.find("Model Statistics").unwrap();
        let chart = page.find("<svg id=\"a\">").unwrap();
        assert!(embed < stats && stats < chart);
        assert!(page.contains("R-squared (R²): NaN"));
        assert!(page.contains("<a href=\"/\">Upload another file</a>"));
        assert!(page.contains("2 rows without a valid date were skipped"));
    }

    #[test]
    fn test_upload_page_posts_file_field() {
        assert!(UPLOAD_PAGE.contains("action=\"/visualize\""));
        assert!(UPLOAD_PAGE.contains("name=\"file\""));
        assert!(UPLOAD_PAGE.contains("multipart/form-data"));
    }
}
