use std::sync::Arc;

use rs_http_features::{
    extract_features, ArtifactLoader, FeatureExtractor, Result, StaticArtifacts, Vocabulary,
    FEATURE_NAMES,
};

/// Classifier returning the share of vocabulary terms present in the title.
fn hit_share_loader(terms: &[&str]) -> Arc<dyn ArtifactLoader> {
    Arc::new(StaticArtifacts::new(
        Vocabulary::from_terms(terms.iter().copied()),
        |batch: &[Vec<f64>]| -> Result<Vec<f64>> {
            Ok(batch
                .iter()
                .map(|v| v.iter().sum::<f64>() / v.len() as f64)
                .collect())
        },
    ))
}

const PHISHING_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head>
    <title>PayPal | Verify your account</title>
    <meta http-equiv="refresh" content="30;url=https://paypa1-secure.example.net/next">
    <link rel="stylesheet" href="https://cdn.kit.example.org/a.css">
    <link rel="icon" href="/favicon.ico">
    <script src="https://cdn.kit.example.org/jquery.js"></script>
    <script src="https://cdn.kit.example.org/app.js"></script>
    <style>
        body { margin: 0 }
    </style>
</head>
<body>
    <img src="https://www.paypalobjects.example.com/logo.png">
    <img src="https://www.paypalobjects.example.com/bg.png">
    <img src="/local.png">
    <form action="post.php" method="post">
        <input type="text" name="email">
        <input type="password" name="pass">
        <input type="submit" value="Log In">
    </form>
    <a href="https://www.paypal.example.com/help">Help</a>
    <a href="https://www.paypal.example.com/privacy">Privacy</a>
    <a href="#">Forgot?</a>
    <a href="javascript:void(0)">Sign up</a>
    <iframe src="https://tracker.example.io/p" width="0" height="0"></iframe>
</body>
</html>
"##;

#[test]
fn phishing_page_features() {
    let page = FeatureExtractor::new(
        PHISHING_PAGE,
        "http://paypa1-secure.example.net/login.php",
        hit_share_loader(&["paypal", "verify", "account", "bank"]),
    );

    assert_eq!(page.is_frame(), 1.0);
    assert_eq!(page.is_meta_redirect(), 1.0);
    assert_eq!(page.is_meta_base64_redirect(), 0.0);
    assert_eq!(page.is_form(), 1.0);
    assert_eq!(page.is_input_submit(), 1.0);
    assert_eq!(page.is_button_submit(), 0.0);

    // Both scripts come from the kit CDN.
    assert_eq!(page.same_extern_domain_script_rate(), 1.0);
    // One of two links is external; the other has no host.
    assert_eq!(page.same_external_domain_link_rate(), 0.5);
    // Two of three images share one external host.
    assert!((page.same_external_domain_img_rate() - 2.0 / 3.0).abs() < 1e-9);
    // Two of four anchors hit paypal.example.com, two go nowhere.
    assert_eq!(page.external_a_tag_same_domain(), 0.5);
    assert_eq!(page.null_a_tag(), 0.5);

    assert!(page.style_block_rate() > 0.0);
    assert!(page.script_block_rate() > 0.0);
    assert_eq!(page.kbytes(), PHISHING_PAGE.trim_end().len() as f64 / 1024.0);

    let title = page.title_feature().expect("title scored");
    assert_eq!(title, 0.75);
}

#[test]
fn vector_follows_feature_names() {
    let page = FeatureExtractor::new(PHISHING_PAGE, "https://example.net/", hit_share_loader(&["paypal"]));
    let vector = page.feature_vector().expect("feature vector");

    assert_eq!(vector.len(), FEATURE_NAMES.len());
    let expected = [
        page.kbytes(),
        page.is_frame(),
        page.is_meta_redirect(),
        page.is_meta_base64_redirect(),
        page.is_form(),
        page.is_input_submit(),
        page.is_button_submit(),
        page.same_extern_domain_script_rate(),
        page.script_block_rate(),
        page.style_block_rate(),
        page.external_a_tag_same_domain(),
        page.null_a_tag(),
        page.same_external_domain_link_rate(),
        page.same_external_domain_img_rate(),
        page.title_feature().expect("title scored"),
    ];
    assert_eq!(vector.values(), &expected[..]);

    for (feature, name) in vector.iter().zip(FEATURE_NAMES) {
        assert_eq!(feature.name, name);
    }
}

#[test]
fn own_domain_references_are_not_external() {
    let html = r#"<html><body>
        <script src="https://static.shop.example.com/a.js"></script>
        <a href="https://shop.example.com/cart">cart</a>
        <a href="https://www.example.com/">home</a>
        <img src="https://img.example.com/x.png">
    </body></html>"#;
    let page = FeatureExtractor::new(html, "https://www.example.com/", hit_share_loader(&["x"]));

    assert_eq!(page.same_extern_domain_script_rate(), 0.0);
    assert_eq!(page.external_a_tag_same_domain(), 0.0);
    assert_eq!(page.same_external_domain_img_rate(), 0.0);
}

#[test]
fn multi_part_suffix_resolves_registrable_domain() {
    let html = r#"<a href="https://a.shop.example.co.uk/1"></a><a href="https://b.shop.example.co.uk/2"></a>"#;
    let page = FeatureExtractor::new(html, "https://other.co.uk/", hit_share_loader(&["x"]));
    assert_eq!(page.domain().as_str(), Some("other.co.uk"));
    assert_eq!(page.external_a_tag_same_domain(), 1.0);
}

#[test]
fn base64_refresh_sets_only_base64_flag() {
    let html = r#"<html><head>
        <meta http-equiv="refresh" content="0; url=data:text/html;base64,PHNjcmlwdD4=">
    </head><body></body></html>"#;
    let page = FeatureExtractor::new(html, "https://example.com/", hit_share_loader(&["x"]));

    assert_eq!(page.is_meta_base64_redirect(), 1.0);
    assert_eq!(page.is_meta_redirect(), 0.0);
}

#[test]
fn script_block_rate_counts_block_lines() {
    let html = "<html>\n<body>\n<script>\nvar a = 1;\nvar b = 2;\n</script>\n</body>\n</html>";
    let page = FeatureExtractor::new(html, "https://example.com/", hit_share_loader(&["x"]));
    // Lines 2..=5 of 8.
    assert_eq!(page.script_block_rate(), 0.5);
}

#[test]
fn commented_out_script_is_ignored() {
    let html = "<p>a</p>\n<!-- <script>evil()</script> -->\n<p>b</p>";
    let page = FeatureExtractor::new(html, "https://example.com/", hit_share_loader(&["x"]));
    assert_eq!(page.script_block_rate(), 0.0);
}

#[test]
fn page_without_title_scores_zero() {
    let features = extract_features(
        "<html><body><p>nothing here</p></body></html>",
        "https://example.com/",
        hit_share_loader(&["x"]),
    )
    .expect("feature vector");
    assert_eq!(features.get("title_feature"), Some(0.0));
}

#[test]
fn feature_vector_serializes_to_json() {
    let features = extract_features("<form></form>", "https://example.com/", hit_share_loader(&["x"]))
        .expect("feature vector");
    let json = serde_json::to_value(features).expect("json");
    let values = json["values"].as_array().expect("values array");
    assert_eq!(values.len(), 15);
    assert_eq!(values[4], serde_json::json!(1.0));
}
