use anyhow::{Context, Result};
use reddit_comments::{init_tracing_once, RedditComments};

// Oct 2007 through Dec 2007
const START: &str = "2007-10";
const END: &str = "2008-01";

fn main() -> Result<()> {
    init_tracing_once();

    // data dir and archive format honour REDDIT_COMMENTS_DATA_DIR / REDDIT_COMMENTS_FORMAT
    let rc = RedditComments::new()
        .file_concurrency(2)
        .progress(true);

    let stats = rc
        .download([Some(START), Some(END)], false)
        .with_context(|| format!("downloading [{START}, {END})"))?;
    println!(
        "Downloaded {} files ({} bytes), {} already present",
        stats.downloaded, stats.bytes, stats.skipped
    );

    let texts = rc
        .query()
        .subreddits(["politics", "reddit.com"])
        .date_range([Some(START), Some(END)])
        .min_len(200)
        .limit(5)
        .texts()?;

    for text in texts {
        println!("{}\n", text?);
    }

    Ok(())
}
