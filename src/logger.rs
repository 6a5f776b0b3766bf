use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

#[ctor::ctor]
fn init() {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info));
    if let Ok(config) = config {
        // a second init in the same process is a no-op
        let _ = log4rs::init_config(config);
    }
}

pub fn log_section(name: &str, content: &[u8]) {
    fn get_byte_array(bytes: &[u8]) -> Vec<String> {
        bytes.iter().map(|byte| format!("{:02X}", byte)).collect()
    }
    log::trace!(
        "{} ({} bytes)\n{:?}",
        name,
        content.len(),
        get_byte_array(content)
    );
}
