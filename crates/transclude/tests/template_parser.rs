//! Integration tests for template invocation extraction.

use transclude::{Argument, Invocation, ParseOptions, TemplateParser, parse_templates};

fn arg(name: &str, value: &str) -> (String, String) {
    (name.to_string(), value.to_string())
}

fn args(invocation: &Invocation) -> Vec<(String, String)> {
    invocation
        .arguments
        .iter()
        .map(|a| (a.name.clone(), a.value.clone()))
        .collect()
}

fn names(found: &[Invocation]) -> Vec<(&str, usize)> {
    found.iter().map(|i| (i.name.as_str(), i.nestlevel)).collect()
}

// =============================================================================
// Basic invocations
// =============================================================================

#[test]
fn test_named_argument() {
    let found = parse_templates("{{Pp|small=yes}}");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Pp");
    assert_eq!(found[0].text, "{{Pp|small=yes}}");
    assert_eq!(found[0].nestlevel, 0);
    assert_eq!(
        found[0].arguments,
        vec![Argument {
            text: "small=yes".into(),
            name: "small".into(),
            value: "yes".into(),
        }]
    );
}

#[test]
fn test_positional_arguments() {
    let found = parse_templates("{{tl|a|b|c}}");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Tl");
    assert_eq!(
        args(&found[0]),
        vec![arg("1", "a"), arg("2", "b"), arg("3", "c")]
    );
}

#[test]
fn test_no_arguments() {
    let found = parse_templates("Some text {{Reflist}} more.");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Reflist");
    assert!(found[0].arguments.is_empty());
    assert_eq!(found[0].offset, 10);
}

#[test]
fn test_empty_input() {
    assert!(parse_templates("").is_empty());
    assert!(parse_templates("plain prose, no braces").is_empty());
}

#[test]
fn test_whitespace_is_trimmed_from_names_and_values() {
    let found = parse_templates("{{Pp | small = yes | x }}");
    assert_eq!(found[0].name, "Pp");
    assert_eq!(found[0].arguments[0].text, " small = yes ");
    assert_eq!(args(&found[0]), vec![arg("small", "yes"), arg("1", "x")]);
}

#[test]
fn test_empty_arguments_still_count() {
    let found = parse_templates("{{X||a}}");
    assert_eq!(args(&found[0]), vec![arg("1", ""), arg("2", "a")]);
}

#[test]
fn test_value_keeps_later_equals_signs() {
    let found = parse_templates("{{X|url=http://a.example/?q=1}}");
    assert_eq!(args(&found[0]), vec![arg("url", "http://a.example/?q=1")]);
}

#[test]
fn test_multiline_invocation() {
    let text = "{{Infobox person\n| name = Ada\n| born = 1815\n}}";
    let found = parse_templates(text);
    assert_eq!(found[0].name, "Infobox_person");
    assert_eq!(args(&found[0]), vec![arg("name", "Ada"), arg("born", "1815")]);
}

#[test]
fn test_non_ascii_text() {
    let found = parse_templates("→ {{éclair|ü=ö|ß}}");
    assert_eq!(found[0].name, "Éclair");
    assert_eq!(args(&found[0]), vec![arg("ü", "ö"), arg("1", "ß")]);
    assert_eq!(found[0].offset, "→ ".len());
}

// =============================================================================
// Name canonicalization
// =============================================================================

#[test]
fn test_namespace_prefix_is_stripped() {
    let found = parse_templates("{{template:pp move}} {{ TEMPLATE: foo }}");
    assert_eq!(found[0].name, "Pp_move");
    assert_eq!(found[1].name, "Foo");
}

#[test]
fn test_other_prefixes_are_kept() {
    let found = parse_templates("{{Wikipedia:Foo}}");
    assert_eq!(found[0].name, "Wikipedia:Foo");
}

#[test]
fn test_is_named_compares_canonical_forms() {
    let found = parse_templates("{{pp move}}");
    assert!(found[0].is_named("Template:Pp move"));
    assert!(found[0].is_named("pp_move"));
    assert!(!found[0].is_named("Pp"));
}

// =============================================================================
// Pipe escaping
// =============================================================================

#[test]
fn test_link_pipe_is_not_a_separator() {
    let found = parse_templates("{{Foo|[[Bar|Baz]]}}");
    assert_eq!(found.len(), 1);
    assert_eq!(args(&found[0]), vec![arg("1", "[[Bar|Baz]]")]);
}

#[test]
fn test_file_link_with_multiple_caption_segments() {
    let found = parse_templates("{{Foo|[[File:X.png|thumb|A [[B|c]] d]]|e}}");
    assert_eq!(
        args(&found[0]),
        vec![arg("1", "[[File:X.png|thumb|A [[B|c]] d]]"), arg("2", "e")]
    );
}

#[test]
fn test_caption_pipe_after_inner_link_is_not_a_separator() {
    let found = parse_templates("{{Foo|[[File:X.png|see [[Y]]|thumb]]}}");
    assert_eq!(found[0].arguments.len(), 1);
    assert_eq!(
        args(&found[0]),
        vec![arg("1", "[[File:X.png|see [[Y]]|thumb]]")]
    );
}

#[test]
fn test_pipe_in_comment_is_not_a_separator() {
    let found = parse_templates("{{X|a<!-- | -->|b}}");
    assert_eq!(args(&found[0]), vec![arg("1", "a<!-- | -->"), arg("2", "b")]);
}

#[test]
fn test_pipe_in_comment_directly_inside_invocation() {
    let found = parse_templates("{{Foo|a<!--|-->|b}}");
    assert_eq!(args(&found[0]), vec![arg("1", "a<!--|-->"), arg("2", "b")]);
}

#[test]
fn test_pipe_in_nowiki_is_not_a_separator() {
    let found = parse_templates("{{X|<nowiki>|</nowiki>}}");
    assert_eq!(args(&found[0]), vec![arg("1", "<nowiki>|</nowiki>")]);
}

#[test]
fn test_pipe_in_parameter_is_not_a_separator() {
    let found = parse_templates("{{Foo|{{{1|default}}}|x}}");
    assert_eq!(found.len(), 1);
    assert_eq!(
        args(&found[0]),
        vec![arg("1", "{{{1|default}}}"), arg("2", "x")]
    );
}

#[test]
fn test_equals_macro_is_not_a_separator() {
    let found = parse_templates("{{X|a{{=}}b|k=v{{=}}w}}");
    assert_eq!(args(&found[0]), vec![arg("1", "a{{=}}b"), arg("k", "v{{=}}w")]);
    // The macro itself is an invocation nested in X.
    assert_eq!(names(&found), vec![("X", 0), ("=", 1), ("=", 1)]);
}

// =============================================================================
// Positional numbering
// =============================================================================

#[test]
fn test_explicit_key_before_positional_collides() {
    let found = parse_templates("{{X|1=a|b}}");
    assert_eq!(args(&found[0]), vec![arg("1", "a"), arg("1", "b")]);
}

#[test]
fn test_explicit_key_equal_to_counter_advances_it() {
    let found = parse_templates("{{X|a|1=b|c}}");
    assert_eq!(
        args(&found[0]),
        vec![arg("1", "a"), arg("1", "b"), arg("3", "c")]
    );
}

#[test]
fn test_numbering_is_local_to_each_invocation() {
    let found = parse_templates("{{X|a|b}}{{Y|c}}");
    assert_eq!(args(&found[0]), vec![arg("1", "a"), arg("2", "b")]);
    assert_eq!(args(&found[1]), vec![arg("1", "c")]);
}

// =============================================================================
// Nesting and ordering
// =============================================================================

#[test]
fn test_nested_invocation() {
    let found = parse_templates("{{Foo|{{Bar|1}}}}");
    assert_eq!(names(&found), vec![("Foo", 0), ("Bar", 1)]);
    assert_eq!(args(&found[0]), vec![arg("1", "{{Bar|1}}")]);
    assert_eq!(args(&found[1]), vec![arg("1", "1")]);
    assert_eq!(found[1].text, "{{Bar|1}}");
    assert_eq!(found[1].offset, 6);
}

#[test]
fn test_level_order_then_subtrees() {
    let found = parse_templates("{{A|{{B|{{C}}}}}}{{D|{{E}}}}");
    assert_eq!(
        names(&found),
        vec![("A", 0), ("D", 0), ("B", 1), ("C", 2), ("E", 1)]
    );
}

#[test]
fn test_spans_match_source() {
    let text = "x {{A|{{B|{{C}}}}}} y {{D|{{E}}}} z";
    for invocation in parse_templates(text) {
        assert_eq!(&text[invocation.span()], invocation.text);
    }
}

#[test]
fn test_non_recursive_reports_outermost_only() {
    let parser = TemplateParser::new(ParseOptions::builder().recursive(false).build());
    let found = parser.parse("{{Foo|{{Bar|1}}}}");
    assert_eq!(names(&found), vec![("Foo", 0)]);
}

#[test]
fn test_max_depth_stops_descent() {
    let parser = TemplateParser::new(ParseOptions::builder().max_depth(1).build());
    let found = parser.parse("{{A|{{B|{{C}}}}}}");
    assert_eq!(names(&found), vec![("A", 0), ("B", 1)]);
}

// =============================================================================
// Comments, verbatim regions and parameters
// =============================================================================

#[test]
fn test_commented_invocation_is_ignored() {
    assert!(parse_templates("<!-- {{Foo}} -->").is_empty());
}

#[test]
fn test_include_verbatim_reports_commented_invocation() {
    let parser = TemplateParser::new(ParseOptions::builder().include_verbatim(true).build());
    let found = parser.parse("<!-- {{Foo}} -->");
    assert_eq!(names(&found), vec![("Foo", 0)]);
}

#[test]
fn test_verbatim_tags_hide_invocations() {
    let text = "<nowiki>{{A}}</nowiki><pre>{{B}}</pre><math>{{C}}</math>{{D}}";
    assert_eq!(names(&parse_templates(text)), vec![("D", 0)]);
}

#[test]
fn test_upper_case_tag_is_not_verbatim() {
    let found = parse_templates("<NOWIKI>{{A}}</NOWIKI>");
    assert_eq!(names(&found), vec![("A", 0)]);
}

#[test]
fn test_self_closing_nowiki_hides_nothing() {
    let found = parse_templates("<nowiki/>{{A}}");
    assert_eq!(names(&found), vec![("A", 0)]);
}

#[test]
fn test_parameter_placeholder_is_not_an_invocation() {
    assert!(parse_templates("{{{title}}}").is_empty());
    assert_eq!(names(&parse_templates("{{{1}}} {{A}}")), vec![("A", 0)]);
}

// =============================================================================
// Malformed input
// =============================================================================

#[test]
fn test_unterminated_invocation_yields_nothing() {
    assert!(parse_templates("{{Foo|bar").is_empty());
}

#[test]
fn test_unterminated_comment_hides_the_rest() {
    assert_eq!(names(&parse_templates("{{X}} <!-- {{Y}}")), vec![("X", 0)]);
}

#[test]
fn test_unterminated_parameter_hides_the_rest() {
    assert!(parse_templates("{{{1| {{X}}").is_empty());
}

#[test]
fn test_stray_closing_braces_are_ignored() {
    assert_eq!(names(&parse_templates("}} {{X}} }}")), vec![("X", 0)]);
}

// =============================================================================
// Filters
// =============================================================================

#[test]
fn test_name_filter() {
    let parser = TemplateParser::default().with_name_filter(|name| name.starts_with("Pp"));
    let found = parser.parse("{{Pp-vandalism}} {{Unrelated}}");
    assert_eq!(names(&found), vec![("Pp-vandalism", 0)]);
}

#[test]
fn test_name_filter_sees_canonical_name() {
    let parser = TemplateParser::default().with_name_filter(|name| name == "Pp_move");
    assert_eq!(parser.parse("{{template:pp move}}").len(), 1);
}

#[test]
fn test_name_filter_rejection_skips_nested_search() {
    let parser = TemplateParser::default().with_name_filter(|name| name == "Pp");
    assert!(parser.parse("{{Foo|{{Pp}}}}").is_empty());
}

#[test]
fn test_whole_invocation_filter_runs_over_all_levels() {
    let parser = TemplateParser::default().with_filter(|invocation| invocation.name == "Pp");
    let found = parser.parse("{{Foo|{{Pp}}}}");
    assert_eq!(names(&found), vec![("Pp", 1)]);
}

#[test]
fn test_filters_combine() {
    let parser = TemplateParser::default()
        .with_name_filter(|name| name != "Skip")
        .with_filter(|invocation| invocation.nestlevel == 0);
    let found = parser.parse("{{A|{{B}}}} {{Skip}} {{C}}");
    assert_eq!(names(&found), vec![("A", 0), ("C", 0)]);
}

// =============================================================================
// Lookup helpers
// =============================================================================

#[test]
fn test_lookup_helpers() {
    let found = parse_templates("{{X|first|k=1|second|k=2}}");
    let x = &found[0];
    assert_eq!(x.positional(1), Some("first"));
    assert_eq!(x.positional(2), Some("second"));
    assert_eq!(x.positional(3), None);
    assert_eq!(x.value("k"), Some("2"));
    assert_eq!(x.body(), "X|first|k=1|second|k=2");
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_reparsing_invocation_text_is_idempotent() {
    let text = "{{A|x=[[L|c]]|{{B|{{{p|d}}}|<!--|-->}}}} {{C|1=a|b}}";
    for invocation in parse_templates(text) {
        let again = parse_templates(&invocation.text);
        assert_eq!(again[0].name, invocation.name);
        assert_eq!(again[0].arguments, invocation.arguments);
        assert_eq!(again[0].nestlevel, 0);
    }
}

#[test]
fn test_wrapping_in_comment_hides_everything() {
    let text = "{{A|{{B|c}}}} and {{D}}";
    assert!(!parse_templates(text).is_empty());
    assert!(parse_templates(&format!("<!--{text}-->")).is_empty());
}

#[test]
fn test_parser_is_shareable_across_threads() {
    let parser = TemplateParser::default().with_name_filter(|name| name != "Skip");
    let pages = ["{{A|{{B}}}}", "{{Skip}}{{C|x}}", "{{D|[[e|f]]}}"];
    let expected: Vec<_> = pages.iter().map(|p| parser.parse(p)).collect();

    let parser = &parser;
    std::thread::scope(|scope| {
        let handles: Vec<_> = pages
            .iter()
            .map(|page| scope.spawn(move || parser.parse(page)))
            .collect();
        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_invocations_serialize_to_json() {
    let found = parse_templates("{{Pp|small=yes}}");
    let json = serde_json::to_value(&found[0]).unwrap();
    assert_eq!(json["name"], "Pp");
    assert_eq!(json["nestlevel"], 0);
    assert_eq!(json["arguments"][0]["value"], "yes");
}

#[test]
fn test_options_deserialize_with_defaults() {
    let options: ParseOptions = serde_json::from_str(r#"{"recursive": false}"#).unwrap();
    assert!(!options.recursive);
    assert!(!options.include_verbatim);
    assert_eq!(options.max_depth, transclude::DEFAULT_MAX_DEPTH);
    assert_eq!(ParseOptions::default().max_depth, 64);
}
