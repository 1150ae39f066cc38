//! End-to-end scenarios over the public API: the overlap engine, the
//! best-anchor search and the length-based projector.

use subalign::reader;
use subalign::timing::interpolate;
use subalign::{
    align_overlap, fragment_text, project, EngineOutput, MatcherOptions, ProjectorOptions,
    SearchOptions, Sentence, SubtitleAlignerBuilder, SubtitleDoc,
};

fn timed_doc(frames: &[(f64, f64)], words: &[&[&str]]) -> SubtitleDoc {
    let mut doc = SubtitleDoc::default();
    for (i, &(start, end)) in frames.iter().enumerate() {
        let mut s = Sentence::new(format!("{}", i + 1), 0);
        s.words = words
            .get(i)
            .map(|w| w.iter().map(|x| x.to_string()).collect())
            .unwrap_or_default();
        s.start = start;
        s.end = end;
        doc.sentences.push(s);
    }
    doc
}

#[test]
fn identical_documents_align_one_to_one() {
    let frames = [(0.0, 2.0), (2.0, 4.0), (4.0, 6.0), (6.0, 8.0), (8.0, 10.0)];
    let words: Vec<&[&str]> = vec![&["one"], &["two"], &["three"], &["four"], &["five"]];
    let src = timed_doc(&frames, &words);
    let trg = timed_doc(&frames, &words);

    let alignment = align_overlap(&src, &trg);
    assert_eq!(alignment.links.len(), 5);
    for (i, link) in alignment.links.iter().enumerate() {
        assert_eq!(link.src_ids, [format!("{}", i + 1)]);
        assert_eq!(link.trg_ids, [format!("{}", i + 1)]);
        assert_eq!(link.overlap_ratio, Some(1.0));
    }
}

#[test]
fn double_tempo_source_merges_two_to_one() {
    let src = timed_doc(&[(0.0, 2.0), (2.0, 4.0), (4.0, 6.0), (6.0, 8.0)], &[]);
    let trg = timed_doc(&[(0.0, 4.0), (4.0, 8.0)], &[]);

    let alignment = align_overlap(&src, &trg);
    assert_eq!(alignment.links.len(), 2);
    assert_eq!(alignment.links[0].src_ids, ["1", "2"]);
    assert_eq!(alignment.links[0].trg_ids, ["1"]);
    assert_eq!(alignment.links[1].src_ids, ["3", "4"]);
    assert_eq!(alignment.links[1].trg_ids, ["2"]);
    assert_eq!(alignment.links[0].overlap_ratio, Some(1.0));
    assert_eq!(alignment.links[1].overlap_ratio, Some(1.0));
    assert_eq!(alignment.empty, 0);
    assert_eq!(alignment.nonempty, 2);
    assert_eq!(alignment.ratio_score(false), 3.0);
}

#[test]
fn best_anchor_search_repairs_a_uniform_offset() {
    let frames: Vec<(f64, f64)> = (0..10)
        .map(|i| (i as f64 * 5.0, i as f64 * 5.0 + 4.0))
        .collect();
    let words: Vec<Vec<String>> = (0..10)
        .map(|i| vec!["Mithrandir".to_string(), format!("word{i}")])
        .collect();

    let mut src = SubtitleDoc::default();
    let mut trg = SubtitleDoc::default();
    for (i, &(start, end)) in frames.iter().enumerate() {
        let mut s = Sentence::new(format!("s{i}"), 0);
        s.words = words[i].clone();
        s.start = start;
        s.end = end;
        src.sentences.push(s);
        let mut t = Sentence::new(format!("t{i}"), 0);
        t.words = words[i].clone();
        t.start = start + 10.0;
        t.end = end + 10.0;
        trg.sentences.push(t);
    }

    // Without synchronization the offset leaves many empty links.
    let presync = align_overlap(&src, &trg);
    assert!(presync.ratio_score(false) < 2.0);

    let aligner = SubtitleAlignerBuilder::new()
        .with_search_options(SearchOptions {
            best_align: true,
            ..SearchOptions::default()
        })
        .build()
        .unwrap();
    let outcome = aligner.align_documents(&src, &trg);
    assert!(outcome.score > 3.0);
    assert!((outcome.slope - 1.0).abs() < 1e-6);
    assert!((outcome.offset - 10.0).abs() < 1e-6);
}

#[test]
fn overlap_coverage_is_a_permutation() {
    let src = timed_doc(
        &[(0.0, 1.0), (1.0, 2.5), (2.5, 6.0), (6.0, 9.0), (9.0, 9.5)],
        &[],
    );
    let trg = timed_doc(&[(0.0, 2.0), (2.0, 4.5), (4.5, 8.0), (8.0, 9.6)], &[]);
    let alignment = align_overlap(&src, &trg);

    let src_ids: Vec<&str> = alignment
        .links
        .iter()
        .flat_map(|l| l.src_ids.iter().map(String::as_str))
        .collect();
    let trg_ids: Vec<&str> = alignment
        .links
        .iter()
        .flat_map(|l| l.trg_ids.iter().map(String::as_str))
        .collect();
    assert_eq!(src_ids, ["1", "2", "3", "4", "5"]);
    assert_eq!(trg_ids, ["1", "2", "3", "4"]);

    for link in &alignment.links {
        if let Some(ratio) = link.overlap_ratio {
            assert!((0.0..=1.0).contains(&ratio));
        }
    }
}

#[test]
fn projector_identity_keeps_three_blocks() {
    let template = "1\n00:00:00,000 --> 00:00:02,000\naaaa bbbb cccc dddd eeee ffffff\n\n\
                    2\n00:00:02,000 --> 00:00:04,000\naaaa bbbb cccc dddd eeee ffffff\n\n\
                    3\n00:00:04,000 --> 00:00:06,000\naaaa bbbb cccc dddd eeee ffffff\n";
    let mut doc = reader::srt::read_document(template).unwrap();
    interpolate(&mut doc, 1.0, 0.0);
    doc.sort_frames();

    let translation = "aaaa bbbb cccc dddd eeee ffffff\naaaa bbbb cccc dddd eeee ffffff\naaaa bbbb cccc dddd eeee ffffff\n";
    let blocks = project(&doc, translation, &ProjectorOptions::default());
    assert_eq!(blocks.len(), 3);
    for block in &blocks {
        assert!(!block.text.contains('\n'), "no wrapping expected");
    }
    assert_eq!(blocks[0].start, 0.0);
    assert_eq!(blocks[0].end, 2.0);
    assert_eq!(blocks[2].end, 6.0);
}

#[test]
fn projector_merges_two_fragments_per_frame() {
    let template = "1\n00:00:00,000 --> 00:00:03,000\n".to_string()
        + &"x".repeat(30)
        + "\n\n2\n00:00:03,000 --> 00:00:06,000\n"
        + &"x".repeat(30)
        + "\n";
    let mut doc = reader::srt::read_document(&template).unwrap();
    interpolate(&mut doc, 1.0, 0.0);

    // Four equal clauses, a sentence end after the second and fourth.
    let translation = "aaaa bbbb ccc, aaaa bbbb cccc.\naaaa bbbb ccc, aaaa bbbb cccc.\n";
    let fragments = fragment_text(translation, &ProjectorOptions::default());
    assert_eq!(fragments.len(), 4);
    assert!(!fragments[0].sent_end && fragments[1].sent_end);
    assert!(!fragments[2].sent_end && fragments[3].sent_end);

    let blocks = project(&doc, translation, &ProjectorOptions::default());
    assert_eq!(blocks.len(), 2);
    assert_eq!(
        blocks[0].text.replace('\n', " "),
        "aaaa bbbb ccc, aaaa bbbb cccc."
    );
    assert_eq!(
        blocks[1].text.replace('\n', " "),
        "aaaa bbbb ccc, aaaa bbbb cccc."
    );
}

#[test]
fn projector_wraps_long_blocks_once() {
    let template = "1\n00:00:00,000 --> 00:00:04,000\n".to_string() + &"x".repeat(60) + "\n";
    let mut doc = reader::srt::read_document(&template).unwrap();
    interpolate(&mut doc, 1.0, 0.0);

    let translation = "aaaa bbbb cccc dddd eeee ddd. ffff gggg hhhh iiii jjjj kkkkk\n";
    let blocks = project(&doc, translation, &ProjectorOptions::default());
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text.matches('\n').count(), 1);
    assert_eq!(
        blocks[0].text,
        "aaaa bbbb cccc dddd eeee ddd.\nffff gggg hhhh iiii jjjj kkkkk"
    );
}

#[test]
fn engine_reads_files_and_emits_xces() {
    let dir = tempfile::tempdir().unwrap();
    let src_path = dir.path().join("src.xml");
    let trg_path = dir.path().join("trg.xml");
    let body = |ids: &[&str]| {
        let mut xml = String::from("<document>\n");
        for (i, id) in ids.iter().enumerate() {
            xml.push_str(&format!(
                "<s id=\"{id}\"><time value=\"00:00:0{i},000\"/><w>Legolas</w><w>speaks</w><time value=\"00:00:0{},500\"/></s>\n",
                i
            ));
        }
        xml.push_str("</document>\n");
        xml
    };
    std::fs::write(&src_path, body(&["a1", "a2", "a3"])).unwrap();
    std::fs::write(&trg_path, body(&["b1", "b2", "b3"])).unwrap();

    let aligner = SubtitleAlignerBuilder::new().build().unwrap();
    let output = aligner.align_files(&src_path, &trg_path).unwrap();
    let EngineOutput::Aligned(outcome) = output else {
        panic!("no fallback configured, expected an aligned result");
    };
    assert_eq!(outcome.alignment.nonempty, 3);

    let xml = subalign::write_xces(
        &outcome.alignment,
        &src_path.display().to_string(),
        &trg_path.display().to_string(),
        &[],
    )
    .unwrap();
    assert!(xml.contains("<cesAlign version=\"1.0\">"));
    assert!(xml.contains("xtargets=\"a1 ; b1\""));
}

#[test]
fn frames_sort_after_interpolation() {
    let text = r#"<d>
<s id="late"><time value="00:00:08,000"/><w>late</w><time value="00:00:09,000"/></s>
<s id="early"><time value="00:00:01,000"/><w>early</w><time value="00:00:02,000"/></s>
</d>"#;
    let mut doc = reader::xml::read_document(text).unwrap();
    interpolate(&mut doc, 1.0, 0.0);
    doc.sort_frames();
    assert_eq!(doc.sentences[0].id, "early");
    for pair in doc.sentences.windows(2) {
        assert!(pair[0].start <= pair[1].start);
    }
    for s in &doc.sentences {
        assert!(s.start < s.end);
    }
}

#[test]
fn cognate_sweep_still_finds_the_offset() {
    let frames: Vec<(f64, f64)> = (0..6)
        .map(|i| (i as f64 * 5.0, i as f64 * 5.0 + 4.0))
        .collect();
    let mut src = SubtitleDoc::default();
    let mut trg = SubtitleDoc::default();
    for (i, &(start, end)) in frames.iter().enumerate() {
        let mut s = Sentence::new(format!("s{i}"), 0);
        s.words = vec![format!("Presidente{i}")];
        s.start = start;
        s.end = end;
        src.sentences.push(s);
        let mut t = Sentence::new(format!("t{i}"), 0);
        t.words = vec![format!("President{i}")];
        t.start = start + 7.0;
        t.end = end + 7.0;
        trg.sentences.push(t);
    }

    let matcher = MatcherOptions {
        use_cognates: true,
        cognate_threshold: 0.9,
        cognate_range: Some(0.7),
        ..MatcherOptions::default()
    };
    let aligner = SubtitleAlignerBuilder::new()
        .with_matcher_options(matcher)
        .with_search_options(SearchOptions {
            best_align: true,
            ..SearchOptions::default()
        })
        .build()
        .unwrap();
    let outcome = aligner.align_documents(&src, &trg);
    assert!((outcome.offset - 7.0).abs() < 1e-6);
    assert_eq!(outcome.alignment.empty, 0);
}
