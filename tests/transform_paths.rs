//! End-to-end transform path scenarios: parse, normalize, serialize, and
//! locate renditions through the public API only.

use mediapath::{
    Format, MediaError, MediaRendition, MediaTransformation, Orientation, Pipeline, Rect, Size,
    Source,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn normalize(path: &str, source: Source) -> Pipeline {
    init_tracing();
    let transformation = MediaTransformation::parse(path, source).unwrap();
    Pipeline::from_transformation(&transformation).unwrap()
}

#[test]
fn square_source_crop_then_resize() {
    let pipeline = normalize(
        "1;2000x2000/crop(97,21,480,360)/960x720.jpeg",
        Source::new("x", 2000, 2000),
    );

    assert_eq!(pipeline.crop, Some(Rect::new(97, 21, 480, 360)));
    assert_eq!(pipeline.final_size(), Size::new(960, 720));
    assert_eq!(pipeline.to_path(), "crop(97,21,480,360)/960x720.jpeg");
    assert_eq!(
        pipeline.to_trace(),
        "blob#1|>crop(97,21,480,360)|>scale(960,720,lanczos3)|>JPEG::encode"
    );
}

#[test]
fn downscaled_variant_keeps_the_crop_term() {
    // The crop was defined after the only resize, so its coordinates are
    // already in that box's space; only the scale differs from the 960x720
    // variant.
    let pipeline = normalize(
        "blob;2000x2000/crop(97,21,480,360)/240x180.jpeg",
        Source::new("x", 2000, 2000),
    );

    assert_eq!(pipeline.crop, Some(Rect::new(97, 21, 480, 360)));
    assert_eq!(pipeline.to_path(), "crop(97,21,480,360)/240x180.jpeg");
}

#[test]
fn crop_after_downsizing_resize_remaps_to_source_space() {
    let pipeline = normalize(
        "blob;1300x1300/crop(56,62,480,360).jpeg",
        Source::new("x", 2000, 2000),
    );

    assert_eq!(pipeline.crop, Some(Rect::new(86, 95, 738, 553)));
    assert_eq!(pipeline.to_path(), "crop(86,95,738,553)/480x360.jpeg");
}

#[test]
fn portrait_source_crop_remap() {
    let pipeline = normalize(
        "35240287;600x800/crop(80,0,450,800).webp",
        Source::new("x", 1125, 1500),
    );

    assert_eq!(pipeline.crop, Some(Rect::new(150, 0, 843, 1500)));
    assert_eq!(pipeline.to_path(), "crop(150,0,843,1500)/450x800.webp");
}

#[test]
fn bare_rotate_path_stays_bare() {
    let pipeline = normalize("rotate(90).jpeg", Source::new("1", 100, 50));

    assert_eq!(pipeline.crop, None);
    assert_eq!(pipeline.scale, None);
    assert_eq!(pipeline.final_size(), Size::new(50, 100));
    assert_eq!(pipeline.to_path(), "rotate(90).jpeg");
}

#[test]
fn blur_out_of_range_fails_at_its_segment() {
    let err = MediaTransformation::parse(
        "10888535;500x500-c/blur(2001).png",
        Source::new("x", 1000, 1000),
    )
    .unwrap_err();

    match err {
        MediaError::Parse(parse) => {
            assert_eq!(parse.index, 1);
            let cause = parse.cause.expect("range cause");
            assert_eq!(cause.field, "blur");
            assert_eq!((cause.min, cause.max, cause.actual), (0.0, 2000.0, 2001.0));
        }
        other => panic!("expected a parse error, got {other}"),
    }
}

#[test]
fn mp4_encode_rejects_odd_final_widths() {
    let pipeline = normalize("crop(0,0,481,360).mp4", Source::new("1", 1000, 1000));

    let err = pipeline.validate().unwrap_err();
    assert!(matches!(err, MediaError::Validation(_)));
    assert!(err.to_string().contains("width divisible by 2"));

    let even = normalize("crop(0,0,480,360).mp4", Source::new("1", 1000, 1000));
    assert!(even.validate().is_ok());
}

#[test]
fn path_idempotence_for_already_canonical_paths() {
    let source = || Source::new("1", 2000, 2000);
    for path in [
        "crop(97,21,480,360)/960x720.jpeg",
        "rotate(180)/100x100.png",
        "flip(x)/crop(0,0,500,500).webp",
        "poster/100x100.jpeg",
        "100x100/blur(5)/quality(82).jpeg",
    ] {
        assert_eq!(normalize(path, source()).to_path(), path, "{path}");
    }
}

#[test]
fn accumulator_paths_reparse_unchanged() {
    // The un-normalized transform_path keeps the caller's segment order.
    let path = "page(1)/crop(3,0,809,1056)/92x120/bg(fff).webp";
    let transformation =
        MediaTransformation::parse(path, Source::new("1", 1000, 1300)).unwrap();
    assert_eq!(transformation.transform_path(), path);
}

#[test]
fn trace_and_path_forms_agree() {
    let pipeline = normalize(
        "1;crop(97,21,480,360)/960x720.jpeg",
        Source::new("x", 2000, 2000),
    );
    let reparsed = Pipeline::parse(&pipeline.to_trace()).unwrap();

    assert_eq!(reparsed.crop, pipeline.crop);
    assert_eq!(reparsed.scale, pipeline.scale);
    assert_eq!(reparsed.encode, pipeline.encode);
    assert_eq!(reparsed.to_path(), pipeline.to_path());
}

#[test]
fn orientation_correction_prefixes_the_pipeline() {
    let source = Source::new("1", 1500, 1125).with_orientation(Orientation::Rotate90);
    let transformation = MediaTransformation::new(source);

    // Upright size before any user operation.
    assert_eq!(transformation.size(), Size::new(1125, 1500));

    let pipeline = Pipeline::build(
        transformation.source().clone(),
        transformation.operations(),
        Some(Format::Jpeg),
    )
    .unwrap();
    assert_eq!(pipeline.rotate, 90);
    assert_eq!(pipeline.to_path(), "rotate(90).jpeg");
}

#[test]
fn rendition_scaling_round_trip() {
    // Literal (un-normalized) rendition path: every size-bearing segment
    // rewrites proportionally, truncating.
    let rendition = MediaRendition::new("1045645", "100x100/crop(0,0,85,20).png", 100, 100);
    assert_eq!(
        rendition.scale(2.0).transform_path(),
        Some("200x200/crop(0,0,170,40).png")
    );
    assert_eq!(
        rendition.scale(2.7).transform_path(),
        Some("270x270/crop(0,0,229,54).png")
    );

    // A locator minted from a normalized pipeline scales the same way.
    let pipeline = normalize("100x100/crop(0,0,85,20).png", Source::new("1045645", 100, 100));
    let rendition = MediaRendition::from_pipeline(&pipeline);
    assert_eq!(rendition.transform_path(), Some("crop(0,0,85,20).png"));
    assert_eq!((rendition.width, rendition.height), (85, 20));

    let doubled = rendition.scale(2.0);
    assert_eq!(doubled.transform_path(), Some("crop(0,0,170,40).png"));
    assert_eq!((doubled.width, doubled.height), (170, 40));
}

#[test]
fn alias_extensions_normalize_in_the_canonical_path() {
    let pipeline = normalize("100x100.jpg", Source::new("1", 500, 500));
    assert_eq!(pipeline.encode.format, Format::Jpeg);
    assert_eq!(pipeline.to_path(), "100x100.jpeg");
}

#[test]
fn pipelines_serialize_for_the_metadata_surface() {
    let pipeline = normalize(
        "1;crop(97,21,480,360)/960x720.jpeg",
        Source::new("x", 2000, 2000),
    );

    let json = serde_json::to_value(&pipeline).unwrap();
    assert_eq!(json["rotate"], 0);
    assert_eq!(json["crop"]["width"], 480);
    assert_eq!(json["scale"]["width"], 960);

    let back: Pipeline = serde_json::from_value(json).unwrap();
    assert_eq!(back, pipeline);
}

#[test]
fn redundant_operations_collapse() {
    // Three size operations, one emitted scale.
    let pipeline = normalize("800x800/400x400/scale(200,200).png", Source::new("1", 1600, 1600));
    assert_eq!(pipeline.crop, None);
    assert_eq!(pipeline.to_path(), "200x200.png");

    // A later crop absorbs the whole resize history.
    let pipeline = normalize("1000x1000/500x500/crop(0,0,250,250).png", Source::new("1", 2000, 2000));
    assert_eq!(pipeline.crop, Some(Rect::new(0, 0, 1000, 1000)));
    assert_eq!(pipeline.to_path(), "crop(0,0,1000,1000)/250x250.png");
}
