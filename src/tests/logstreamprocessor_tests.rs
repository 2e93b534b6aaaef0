// src/tests/logstreamprocessor_tests.rs

//! tests for `logstreamprocessor.rs`

#![allow(non_snake_case)]

use crate::common::{FPath, FileType};
use crate::data::entry::{DtEntry, LogEntry};
use crate::debug::helpers::{
    create_temp_file,
    create_temp_file_bytes_with_suffix,
    create_temp_file_gz,
    ntf_fpath,
};
use crate::readers::dtprefixparser::DtPrefixParser;
use crate::readers::entrysink::EntryCollector;
use crate::readers::logstreamprocessor::{open_path, Lines, LogStreamProcessor, ProcessingStage};
use crate::tests::common::{
    RawMonitor,
    TestEntry,
    TestParser,
    DT_20240101,
    DT_20240102,
    DT_20240103,
    FO_0,
    LOG_3ENTRY,
    TP_FAIL,
};

use std::io::{Cursor, Error, ErrorKind, Result};

use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

type LogStreamProcessorDt<'a> = LogStreamProcessor<'a, DtPrefixParser, EntryCollector<DtEntry>>;
type LogStreamProcessorTest<'a> = LogStreamProcessor<'a, TestParser, EntryCollector<TestEntry>>;

/// helper to wrap the match and panic checks
fn new_LogStreamProcessorDt<'a>() -> LogStreamProcessorDt<'a> {
    match LogStreamProcessor::new(DtPrefixParser::new(FO_0), EntryCollector::new(), None, None) {
        Ok(val) => val,
        Err(err) => panic!("LogStreamProcessor::new() failed {}", err),
    }
}

/// helper to wrap the match and panic checks
fn new_LogStreamProcessorTest<'a>() -> LogStreamProcessorTest<'a> {
    match LogStreamProcessor::new(TestParser::default(), EntryCollector::new(), None, None) {
        Ok(val) => val,
        Err(err) => panic!("LogStreamProcessor::new() failed {}", err),
    }
}

/// helper to create an iterator of `Ok` lines
fn ok_lines(lines: &[&str]) -> Vec<Result<String>> {
    lines
        .iter()
        .map(|line| Ok(String::from(*line)))
        .collect()
}

/// helper to collect the `Lines` of `data`
fn lines_of(data: &[u8]) -> Vec<Result<String>> {
    Lines::new(Cursor::new(data.to_vec())).collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// run
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_LogStreamProcessor_new_bad_filters() {
    let result = LogStreamProcessor::new(
        DtPrefixParser::new(FO_0),
        EntryCollector::<DtEntry>::new(),
        Some(*DT_20240103),
        Some(*DT_20240101),
    );
    match result {
        Ok(lsp) => panic!("expected Err, got {:?}", lsp),
        Err(err) => assert_eq!(err.kind(), ErrorKind::InvalidInput),
    }
}

#[test]
fn test_LogStreamProcessor_run_empty() {
    let mut lsp = new_LogStreamProcessorTest();
    assert_eq!(lsp.processingstage(), ProcessingStage::Stage0Ready);
    lsp.run(ok_lines(&[])).unwrap();
    assert_eq!(lsp.processingstage(), ProcessingStage::Stage2Done);
    assert_eq!(lsp.count_lines_read(), 0);
    assert_eq!(lsp.summary().EntryAssembler_records, 0);
    let collector = lsp.into_sink();
    assert_eq!(collector.count_entries(), 0);
    assert_eq!(collector.count_unknown_entries(), 0);
}

#[test]
fn test_LogStreamProcessor_run_flushes_trailing_record() {
    let mut lsp = new_LogStreamProcessorTest();
    lsp.run(ok_lines(&["BEGIN 1 a", "BEGIN 2 b", "  trailing"]))
        .unwrap();
    assert_eq!(lsp.count_lines_read(), 3);
    assert!(lsp.entryassembler().is_buffer_empty());
    let collector = lsp.into_sink();
    assert_eq!(collector.count_entries(), 2);
    assert_eq!(collector.entries[1].raw, "BEGIN 2 b\n  trailing");
}

#[test]
fn test_LogStreamProcessor_run_twice() {
    let mut lsp = new_LogStreamProcessorTest();
    lsp.run(ok_lines(&["BEGIN 1 a"])).unwrap();
    match lsp.run(ok_lines(&["BEGIN 2 b"])) {
        Ok(_) => panic!("expected Err"),
        Err(err) => assert_eq!(err.kind(), ErrorKind::InvalidInput),
    }
    assert_eq!(lsp.count_lines_read(), 1);
    assert_eq!(lsp.into_sink().count_entries(), 1);
}

/// a failing line source stops processing; nothing more is consumed and
/// the pending log message is not flushed
#[test]
fn test_LogStreamProcessor_run_source_error() {
    let mut lsp = new_LogStreamProcessorTest();
    let lines: Vec<Result<String>> = vec![
        Ok(String::from("BEGIN 1 a")),
        Ok(String::from("BEGIN 2 b")),
        Err(Error::new(ErrorKind::UnexpectedEof, "source failed")),
        Ok(String::from("BEGIN 3 c")),
    ];
    match lsp.run(lines) {
        Ok(_) => panic!("expected Err"),
        Err(err) => assert_eq!(err.kind(), ErrorKind::UnexpectedEof),
    }
    assert_eq!(lsp.processingstage(), ProcessingStage::Stage1StreamLines);
    assert_eq!(lsp.count_lines_read(), 2);
    let collector = lsp.into_sink();
    assert_eq!(collector.count_entries(), 1);
    assert_eq!(collector.entries[0].raw, "BEGIN 1 a");
}

/// a parser failure stops processing
#[test]
fn test_LogStreamProcessor_run_parser_error() {
    let mut lsp = new_LogStreamProcessorTest();
    let fail = format!("BEGIN 2 {}", TP_FAIL);
    let lines: Vec<Result<String>> = ok_lines(&["BEGIN 1 a", fail.as_str(), "BEGIN 3 c", "BEGIN 4 d"]);
    match lsp.run(lines) {
        Ok(_) => panic!("expected Err"),
        Err(err) => assert_eq!(err.kind(), ErrorKind::Other),
    }
    // the failure happened while consuming line 3
    assert_eq!(lsp.count_lines_read(), 3);
    assert_eq!(lsp.summary().EntryAssembler_lines, 3);
    assert_eq!(lsp.into_sink().count_entries(), 1);
}

#[test]
fn test_LogStreamProcessor_run_parser_error_at_flush() {
    let mut lsp = new_LogStreamProcessorTest();
    assert!(lsp.run(ok_lines(&["BEGIN 1 a", TP_FAIL])).is_err());
    assert_ne!(lsp.processingstage(), ProcessingStage::Stage2Done);
}

#[test]
fn test_LogStreamProcessor_add_monitor() {
    let mut raws = RawMonitor::default();
    let mut lsp = new_LogStreamProcessorTest();
    lsp.add_monitor(&mut raws);
    lsp.run(ok_lines(&["x", "BEGIN 1 a", "y"])).unwrap();
    drop(lsp);
    assert_eq!(raws.raws, vec!["x", "BEGIN 1 a\ny"]);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// read_and_process
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn assert_3entry(collector: &EntryCollector<DtEntry>) {
    assert_eq!(collector.count_entries(), 3);
    assert_eq!(collector.count_unknown_entries(), 0);
    assert_eq!(collector.entries[0].dt(), &*DT_20240101);
    assert_eq!(collector.entries[1].dt(), &*DT_20240102);
    assert_eq!(collector.entries[2].dt(), &*DT_20240103);
    assert_eq!(collector.entries[1].count_lines(), 3);
    assert_eq!(
        collector.entries[1].text(),
        "2024-01-02 00:00:00 ERROR request failed\nTraceback (most recent call last):\n  File \"app.py\", line 12, in <module>"
    );
}

#[test]
fn test_LogStreamProcessor_read_and_process_file() {
    let ntf = create_temp_file(LOG_3ENTRY);
    let path: FPath = ntf_fpath(&ntf);
    let mut lsp = new_LogStreamProcessorDt();
    lsp.read_and_process(&path).unwrap();
    assert_eq!(lsp.count_lines_read(), 5);
    let summary = lsp.summary();
    assert_eq!(summary.EntryAssembler_dt_first, Some(*DT_20240101));
    assert_eq!(summary.EntryAssembler_dt_last, Some(*DT_20240103));
    assert_3entry(&lsp.into_sink());
}

#[test]
fn test_LogStreamProcessor_read_and_process_file_crlf() {
    let data: String = LOG_3ENTRY.replace('\n', "\r\n");
    let ntf = create_temp_file(data.as_str());
    let path: FPath = ntf_fpath(&ntf);
    let mut lsp = new_LogStreamProcessorDt();
    lsp.read_and_process(&path).unwrap();
    assert_3entry(&lsp.into_sink());
}

#[test]
fn test_LogStreamProcessor_read_and_process_file_no_final_newline() {
    let data: &str = LOG_3ENTRY.trim_end();
    let ntf = create_temp_file(data);
    let path: FPath = ntf_fpath(&ntf);
    let mut lsp = new_LogStreamProcessorDt();
    lsp.read_and_process(&path).unwrap();
    assert_3entry(&lsp.into_sink());
}

#[test]
fn test_LogStreamProcessor_read_and_process_gz() {
    let ntf = create_temp_file_gz(LOG_3ENTRY);
    let path: FPath = ntf_fpath(&ntf);
    assert_eq!(FileType::from_path(&path), FileType::FileGz);
    let mut lsp = new_LogStreamProcessorDt();
    lsp.read_and_process(&path).unwrap();
    assert_3entry(&lsp.into_sink());
}

#[test]
fn test_LogStreamProcessor_read_and_process_filtered() {
    let ntf = create_temp_file(LOG_3ENTRY);
    let path: FPath = ntf_fpath(&ntf);
    let mut lsp: LogStreamProcessorDt =
        LogStreamProcessor::new(DtPrefixParser::new(FO_0), EntryCollector::new(), Some(*DT_20240102), None).unwrap();
    lsp.read_and_process(&path).unwrap();
    let summary = lsp.summary();
    let collector = lsp.into_sink();
    assert_eq!(collector.count_entries(), 2);
    assert_eq!(collector.entries[0].dt(), &*DT_20240102);
    assert_eq!(summary.EntryAssembler_entries_filtered_before, 1);
}

#[test]
fn test_LogStreamProcessor_read_and_process_file_not_exist() {
    let path: FPath = FPath::from("/THIS/PATH/DOES/NOT/EXIST/tmp-lea-test.log");
    let mut lsp = new_LogStreamProcessorDt();
    match lsp.read_and_process(&path) {
        Ok(_) => panic!("expected Err"),
        Err(err) => {
            assert_eq!(err.kind(), ErrorKind::NotFound);
            assert!(err.to_string().contains(path.as_str()), "error {:?} does not name the path", err.to_string());
        }
    }
    assert_eq!(lsp.processingstage(), ProcessingStage::Stage0Ready);
}

#[test]
fn test_LogStreamProcessor_read_and_process_invalid_utf8() {
    let data: &[u8] = b"2024-01-01 00:00:00 a\n2024-01-02 00:00:00 \xFF\xFE\n2024-01-03 00:00:00 c\n";
    let ntf = create_temp_file_bytes_with_suffix(data, ".log");
    let path: FPath = ntf_fpath(&ntf);
    let mut lsp = new_LogStreamProcessorDt();
    match lsp.read_and_process(&path) {
        Ok(_) => panic!("expected Err"),
        Err(err) => assert_eq!(err.kind(), ErrorKind::InvalidData),
    }
    assert_eq!(lsp.count_lines_read(), 1);
    assert_eq!(lsp.into_sink().count_entries(), 0);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Lines and open_path
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case(b"", &[]; "empty")]
#[test_case(b"\n", &[""]; "one empty line")]
#[test_case(b"a", &["a"]; "no newline")]
#[test_case(b"a\nb\n", &["a", "b"]; "two lines")]
#[test_case(b"a\r\nb\r\n", &["a", "b"]; "crlf")]
#[test_case(b"a\rb\n", &["a\rb"]; "lone cr kept")]
#[test_case(b"a\n\n\nb", &["a", "", "", "b"]; "empty lines")]
fn test_Lines(
    data: &[u8],
    expect: &[&str],
) {
    let lines: Vec<String> = lines_of(data)
        .into_iter()
        .map(|result| result.unwrap())
        .collect();
    assert_eq!(lines, expect);
}

#[test]
fn test_Lines_invalid_utf8() {
    let lines = lines_of(b"ok\n\xC3\x28\nnever\n");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].as_ref().unwrap(), "ok");
    match &lines[1] {
        Ok(line) => panic!("expected Err, got {:?}", line),
        Err(err) => {
            assert_eq!(err.kind(), ErrorKind::InvalidData);
            assert!(err.to_string().contains("line 2"), "{}", err);
        }
    }
}

#[test]
fn test_open_path_reads_gz() {
    let ntf = create_temp_file_gz("a\nb\n");
    let reader = open_path(&ntf_fpath(&ntf)).unwrap();
    let lines: Vec<String> = Lines::new(reader)
        .map(|result| result.unwrap())
        .collect();
    assert_eq!(lines, vec!["a", "b"]);
}
