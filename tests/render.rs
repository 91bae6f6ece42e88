//! End-to-end rendering tests: geometry must survive the trip through the
//! serialized document.

use stemma::shape::Rectangle;
use stemma::{Chart, Direction};

fn two_node_chart(direction: Direction) -> Chart {
    let mut chart = Chart::new(direction);
    let root = chart
        .add_sized_node("root", Rectangle.into(), 100.0, 40.0)
        .unwrap();
    chart
        .add_sized_child(root, "child", Rectangle.into(), 100.0, 40.0)
        .unwrap();
    chart
}

#[test]
fn single_node_document() {
    let mut chart = Chart::new(Direction::TopDown);
    chart
        .add_sized_node("Start", Rectangle.into(), 100.0, 40.0)
        .unwrap();
    insta::assert_snapshot!(chart.to_svg().trim_end(), @r#"
<svg xmlns="http://www.w3.org/2000/svg" viewBox="-10 0 200 140">
<g>
<circle cx="90" cy="40" r="2" fill="orangered"/>
<circle cx="90" cy="80" r="2" fill="orangered"/>
<circle cx="40" cy="60" r="2" fill="orangered"/>
<circle cx="140" cy="60" r="2" fill="orangered"/>
<circle cx="90" cy="100" r="2" fill="orangered"/>
<rect x="40" y="40" width="100" height="40" fill="lightgray" stroke="black" stroke-width="1"/>
<text x="90" y="60" dy="0.3em" text-anchor="middle" font-family="sans-serif" font-size="24">Start</text>
</g>
</svg>
"#);
}

#[test]
fn connector_polyline_round_trips() {
    let chart = two_node_chart(Direction::TopDown);
    let svg = chart.to_svg();

    let re = regex_lite::Regex::new(r#"<polyline points="([^"]+)""#).unwrap();
    let caps = re.captures(&svg).expect("document contains a connector");
    let parsed: Vec<f64> = caps[1]
        .split([' ', ','])
        .map(|n| n.parse().unwrap())
        .collect();

    // Parent edge point, parent anchor, child anchor, child edge point.
    assert_eq!(parsed, [90.0, 80.0, 90.0, 100.0, 90.0, 100.0, 90.0, 120.0]);

    let geometry: Vec<f64> = stemma::connectors(&chart)[0]
        .iter()
        .flat_map(|p| [p.x, p.y])
        .collect();
    assert_eq!(parsed, geometry);
}

#[test]
fn bottom_up_viewport_extends_into_negative_coordinates() {
    let svg = two_node_chart(Direction::BottomUp).to_svg();
    assert!(svg.starts_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-10 -140 200 220">"#
    ));
}

#[test]
fn prompt_renders_every_node_and_edge() {
    let svg = stemma::generate("demo TD\nStart -t p --> A\nStart --> B\nA --> deep one\n")
        .unwrap();
    // One group per node, one connector per edge, a polygon for the
    // parallelogram root and rects for the rest.
    assert_eq!(svg.matches("<g>").count(), 4);
    assert_eq!(svg.matches("</g>").count(), 4);
    assert_eq!(svg.matches("<polyline").count(), 3);
    assert_eq!(svg.matches("<polygon").count(), 1);
    assert_eq!(svg.matches("<rect").count(), 3);
    for label in ["Start", "A", "B", "deep one"] {
        assert!(svg.contains(&format!(">{label}</text>")));
    }
}

#[test]
fn direction_rotation_preserves_document_extent() {
    for direction in Direction::ALL {
        let forward = two_node_chart(direction).to_svg();
        let reversed = two_node_chart(direction.opposite()).to_svg();
        let extent = |svg: &str| {
            let re = regex_lite::Regex::new(r#"viewBox="[^"]*? ([\d.]+) ([\d.]+)""#).unwrap();
            let caps = re.captures(svg).unwrap();
            (caps[1].to_string(), caps[2].to_string())
        };
        assert_eq!(extent(&forward), extent(&reversed));
    }
}
