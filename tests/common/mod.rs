#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use tempfile::TempDir;

/// Write a `.bz2` monthly file containing the provided JSONL lines.
pub fn write_bz2_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = bzip2::write::BzEncoder::new(f, bzip2::Compression::fast());
    for l in lines {
        writeln!(&mut enc, "{}", l).unwrap();
    }
    enc.finish().unwrap();
}

/// Write a `.zst` monthly file containing the provided JSONL lines.
pub fn write_zst_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    for l in lines {
        writeln!(&mut enc, "{}", l).unwrap();
    }
    enc.finish().unwrap();
}

/// Write a file with the right name but contents that are not bzip2 at all.
pub fn write_garbage(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = File::create(path).unwrap();
    writeln!(&mut f, "{{\"id\":\"bad\",\"subreddit\":\"politics\"}}").unwrap();
}

/// One comment line in the 2007-2015 dump layout.
pub fn comment(id: &str, subreddit: &str, score: i64, created_utc: Value, body: &str) -> String {
    json!({
        "id": id, "author": format!("user_{id}"), "subreddit": subreddit, "subreddit_id": "t5_x",
        "score": score, "ups": score, "gilded": 0, "controversiality": 0,
        "created_utc": created_utc, "retrieved_on": 1425124228,
        "body": body, "parent_id": "t3_p1", "link_id": "t3_p1", "edited": false,
        "distinguished": null, "archived": true
    })
    .to_string()
}

/// Tiny three-month corpus under `<tmp>/YYYY/RC_YYYY-MM.bz2`:
///
/// - RC_2007-10: a1 politics (score 10, Oct 15), a2 news (score -3, Oct 20),
///   a3 politics with a non-numeric `created_utc`
/// - RC_2007-11: b1 politics "short" (score 5), b2 reddit.com (score 100, long body),
///   b3 politics (score 0, Nov 30 23:59:59, markup + whitespace)
/// - RC_2007-12: c1 politics (Dec 1 00:00:00)
pub fn make_corpus_basic() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();

    write_bz2_lines(
        &base.join("2007").join("RC_2007-10.bz2"),
        &[
            comment("a1", "politics", 10, json!(1192449600),
                "First *politics* comment with a [link](http://example.com/a)"),
            comment("a2", "news", -3, json!("1192869000"), "news &gt; everything"),
            comment("a3", "politics", 1, json!("yesterday"), "bad timestamp"),
        ],
    );
    write_bz2_lines(
        &base.join("2007").join("RC_2007-11.bz2"),
        &[
            comment("b1", "politics", 5, json!(1193961600), "short"),
            comment("b2", "reddit.com", 100, json!(1194689410),
                "A rather long comment body that easily clears any modest minimum length filter."),
            comment("b3", "politics", 0, json!(1196467199), "`code` ~strike~\n\n   spaced   out  "),
        ],
    );
    write_bz2_lines(
        &base.join("2007").join("RC_2007-12.bz2"),
        &[comment("c1", "politics", 2, json!(1196467200), "december")],
    );

    dir
}

/// Three months where every comment is in r/politics: 2 in Oct, 3 in Nov, and a
/// December file that is corrupt, so any attempt to read it fails.
pub fn make_corpus_limit() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    let oct: Vec<String> = (0..2)
        .map(|i| comment(&format!("o{i}"), "politics", 1, json!(1192449600 + i), &format!("october {i}")))
        .collect();
    let nov: Vec<String> = (0..3)
        .map(|i| comment(&format!("n{i}"), "politics", 1, json!(1193961600 + i), &format!("november {i}")))
        .collect();
    write_bz2_lines(&base.join("2007").join("RC_2007-10.bz2"), &oct);
    write_bz2_lines(&base.join("2007").join("RC_2007-11.bz2"), &nov);
    write_garbage(&base.join("2007").join("RC_2007-12.bz2"));
    dir
}

/// Serve `body_for(path)` over plain HTTP on an ephemeral local port, one response
/// per connection, until the test process exits. Returns the base URL.
pub fn serve_http(body_for: fn(&str) -> Vec<u8>) -> String {
    // keep any ambient HTTP proxy out of loopback requests
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    std::env::set_var("no_proxy", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            // drain headers
            loop {
                let mut h = String::new();
                match reader.read_line(&mut h) {
                    Ok(0) | Err(_) => break,
                    Ok(_) if h == "\r\n" || h == "\n" => break,
                    Ok(_) => {}
                }
            }
            let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
            let body = body_for(&path);
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
            let _ = stream.flush();
        }
    });
    format!("http://{}/reddit_data/", addr)
}

/// Read a whole file into bytes.
pub fn read_bytes(path: &Path) -> Vec<u8> {
    let mut buf = Vec::new();
    File::open(path).unwrap().read_to_end(&mut buf).unwrap();
    buf
}
