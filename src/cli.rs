use std::path::PathBuf;

use clap::Parser;

use crate::store::DEFAULT_GRADE_FILE;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Grade list file, created with the default grades if missing
    #[clap(short, long, value_name = "PATH", default_value = DEFAULT_GRADE_FILE, parse(from_os_str))]
    pub grades: PathBuf,
}

pub fn get_args() -> Args {
    Args::parse()
}
