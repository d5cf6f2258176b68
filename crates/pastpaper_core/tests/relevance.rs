use pastpaper_core::resolver::BrowseResult;
use pastpaper_core::{
    browse, scoped_subjects, search_subjects, subject_detail, subject_paper_count, Catalog,
    CatalogData, PaperType, Preferences, Stream, Subject, University,
};

fn prefs_with_stream(stream_id: Option<&str>) -> Preferences {
    Preferences {
        university_id: stream_id.map(|_| "U1".to_string()),
        stream_id: stream_id.map(str::to_string),
        ready: true,
        ..Preferences::default()
    }
}

fn ids(subjects: &[&Subject]) -> Vec<String> {
    subjects.iter().map(|s| s.id.clone()).collect()
}

#[test]
fn streams_and_colleges_follow_university() {
    let catalog = Catalog::sample().expect("sample catalog");

    let streams: Vec<&str> = catalog
        .streams_of(Some("U1"))
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(streams, ["ST1", "ST2"]);
    assert_eq!(catalog.colleges_of(Some("U2")).len(), 1);

    assert!(catalog.streams_of(None).is_empty());
    assert!(catalog.streams_of(Some("U404")).is_empty());
    assert!(catalog.colleges_of(None).is_empty());
}

#[test]
fn subjects_of_excludes_unscoped_subjects() {
    let catalog = Catalog::sample().expect("sample catalog");
    let scoped = catalog.subjects_of("ST1");
    assert_eq!(ids(&scoped), ["S1", "S2", "S3"]);
    assert!(scoped.iter().all(|s| s.stream_id.as_deref() == Some("ST1")));
    assert!(catalog.subjects_of("ST-unknown").is_empty());
}

#[test]
fn papers_of_keeps_insertion_order() {
    let catalog = Catalog::sample().expect("sample catalog");
    let papers: Vec<&str> = catalog.papers_of("S1").iter().map(|p| p.id.as_str()).collect();
    assert_eq!(papers, ["P1", "P2", "P3"]);
    assert!(catalog.papers_of("S-unknown").is_empty());
}

#[test]
fn unset_stream_browses_everything() {
    let catalog = Catalog::sample().expect("sample catalog");
    let all = scoped_subjects(&catalog, &prefs_with_stream(None));
    assert_eq!(all.len(), catalog.subjects().len());
    assert!(all.iter().any(|s| s.is_unscoped()));
}

#[test]
fn selected_stream_scopes_exactly() {
    let catalog = Catalog::sample().expect("sample catalog");
    for stream in catalog.streams() {
        let scoped = scoped_subjects(&catalog, &prefs_with_stream(Some(stream.id.as_str())));
        let expected: Vec<&Subject> = catalog
            .subjects()
            .iter()
            .filter(|s| s.stream_id.as_deref() == Some(stream.id.as_str()))
            .collect();
        assert_eq!(scoped, expected);
    }
}

#[test]
fn empty_query_is_identity() {
    let catalog = Catalog::sample().expect("sample catalog");
    let list: Vec<&Subject> = catalog.subjects().iter().collect();
    assert_eq!(search_subjects(&list, ""), list);
    assert_eq!(search_subjects(&list, "   \t"), list);
}

#[test]
fn substring_search_is_case_insensitive() {
    let subject = Subject {
        id: "S1".to_string(),
        stream_id: None,
        name: "Operating Systems".to_string(),
        code: Some("CS301".to_string()),
        semester: Some("Sem 5".to_string()),
    };
    let list = vec![&subject];
    assert_eq!(search_subjects(&list, "operating"), list);
}

#[test]
fn search_preserves_input_order() {
    let catalog = Catalog::sample().expect("sample catalog");
    let list: Vec<&Subject> = catalog.subjects().iter().collect();
    let hits = search_subjects(&list, "sem 5");
    assert_eq!(ids(&hits), ["S1", "S2", "S7"]);
}

#[test]
fn paper_count_is_global() {
    let catalog = Catalog::sample().expect("sample catalog");
    assert_eq!(subject_paper_count(&catalog, "S1"), 3);
    assert_eq!(subject_paper_count(&catalog, "S8"), 1);
    assert_eq!(subject_paper_count(&catalog, "S3"), 0);
    assert_eq!(subject_paper_count(&catalog, "S-unknown"), 0);
}

#[test]
fn browse_combines_scope_and_query() {
    let catalog = Catalog::sample().expect("sample catalog");
    let result: BrowseResult = browse(&catalog, &prefs_with_stream(Some("ST1")), " systems ");
    assert!(result.stream_scoped);
    assert_eq!(result.query, "systems");
    assert_eq!(ids(&result.subjects), ["S1", "S2"]);

    let unscoped = browse(&catalog, &prefs_with_stream(None), "environmental");
    assert!(!unscoped.stream_scoped);
    assert_eq!(ids(&unscoped.subjects), ["S8"]);
}

#[test]
fn subject_detail_lists_papers() {
    let catalog = Catalog::sample().expect("sample catalog");
    let detail = subject_detail(&catalog, "S4").expect("known subject");
    assert_eq!(detail.paper_count(), 1);
    assert_eq!(detail.papers[0].kind, PaperType::Notes);
    assert!(subject_detail(&catalog, "S-unknown").is_none());
}

#[test]
fn catalog_built_in_code_answers_queries() {
    let catalog = Catalog::new(CatalogData {
        universities: vec![University {
            id: "U1".to_string(),
            name: "Test University".to_string(),
        }],
        streams: vec![Stream {
            id: "ST1".to_string(),
            university_id: "U1".to_string(),
            name: "Physics".to_string(),
        }],
        subjects: vec![Subject {
            stream_id: Some("ST1".to_string()),
            ..Subject::new("S1", "Mechanics")
        }],
        ..CatalogData::default()
    })
    .unwrap();

    assert_eq!(catalog.subjects_of("ST1").len(), 1);
    assert_eq!(subject_paper_count(&catalog, "S1"), 0);
    assert!(catalog.stream_belongs_to("ST1", "U1"));
    assert!(!catalog.college_belongs_to("C1", "U1"));
}
