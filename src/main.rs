use std::{
    fs,
    path::Path,
    sync::{Arc, Mutex},
    time::Duration,
};

use blog_site::{
    carousel::SlideView,
    config::Config,
    constants::{CONFIG_FILE_NAME, CONTACT_SUCCESS_MESSAGE},
    error::SiteResult,
    forms::{ContactFields, FieldErrors, FormRules, Submission},
    site::Site,
    storage::json_file::JsonFileStorage,
    utils::set_global_log_level,
    view::LatestFragment,
};
use clap::{crate_description, ArgEnum, Parser, Subcommand};
use log::info;

#[derive(Parser)]
#[clap(author, version, about = crate_description!(), long_about=None)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(ArgEnum, Clone, Copy)]
enum ContactFormKind {
    Homepage,
    ContactPage,
}

impl ContactFormKind {
    const fn rules(self) -> FormRules {
        match self {
            Self::Homepage => FormRules::HOMEPAGE,
            Self::ContactPage => FormRules::CONTACT_PAGE,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Create a sample configuration file with all the values pre-filled
    CreateSampleConfig {
        /// Create the configuration file even if it already exists
        #[clap(long, takes_value = false)]
        force: bool,
    },
    /// Show the current theme
    Theme {
        /// Switch to the other theme first
        #[clap(long, takes_value = false)]
        toggle: bool,
    },
    /// Show the article grid
    Articles {
        /// Only show the articles with this tag ("all" shows everything)
        #[clap(long, conflicts_with = "search")]
        tag: Option<String>,
        /// Only show the articles mentioning this text
        #[clap(long)]
        search: Option<String>,
    },
    /// Open an article's detail page
    ViewArticle { id: u32 },
    /// Show the comments
    Comments,
    /// Leave a comment
    Comment { name: String, content: String },
    /// Send a message through one of the contact forms
    Contact {
        /// Required by the contact page form only
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        email: String,
        /// Required by the contact page form only
        #[clap(long)]
        message: Option<String>,
        #[clap(long, arg_enum, default_value = "contact-page")]
        form: ContactFormKind,
    },
    /// Let the carousel play by itself for a while
    Slideshow {
        #[clap(long, default_value = "3")]
        slides: usize,
        #[clap(long, default_value = "12")]
        seconds: u64,
    },
}

macro_rules! clean_panic {
    ($message:literal$(,)? $($arg:expr),*) => {
        {
            use std::process;
            eprintln!($message, $($arg),*);
            process::exit(1);
        }
    }
}

/// Prints a line whenever a slide gets shown
struct TerminalSlides {
    slide_count: usize,
}

impl SlideView for TerminalSlides {
    fn slide_count(&self) -> usize {
        self.slide_count
    }

    fn set_slide_active(&mut self, index: usize, active: bool) {
        if active {
            println!("Slide {}/{}", index + 1, self.slide_count);
        }
    }

    fn set_indicator_active(&mut self, _index: usize, _active: bool) {}
}

fn print_fragment(fragment: &LatestFragment) {
    if let Some(markup) = fragment.take() {
        println!("{}", markup.trim());
    }
}

fn report_field_errors(errors: &FieldErrors) -> ! {
    for error in errors.iter() {
        eprintln!("{:?}: {}", error.field(), error);
    }
    std::process::exit(1);
}

async fn run(command: Command, site: &mut Site<JsonFileStorage>) -> SiteResult<()> {
    match command {
        Command::CreateSampleConfig { .. } => unreachable!("handled before the site is set up"),
        Command::Theme { toggle } => {
            if toggle {
                site.theme_mut().toggle()?;
            }
            println!("{}", site.theme().theme().as_str());
        }
        Command::Articles { tag, search } => {
            let grid = LatestFragment::default();
            let mut browser = site.article_browser(grid.clone())?;
            if let Some(tag) = tag {
                browser.select_tag(&tag)?;
            } else if let Some(query) = search {
                browser.search(&query)?;
            }
            println!("{}", browser.tag_bar()?.trim());
            print_fragment(&grid);
        }
        Command::ViewArticle { id } => {
            let browser = site.article_browser(LatestFragment::default())?;
            match browser.view_article(id)? {
                Some(detail_page) => println!("{}", detail_page),
                None => clean_panic!("There's no article with id {}", id),
            }
        }
        Command::Comments => {
            let list = LatestFragment::default();
            site.comment_board(list.clone());
            print_fragment(&list);
        }
        Command::Comment { name, content } => {
            let list = LatestFragment::default();
            let board = site.comment_board(list.clone());
            if let Submission::Rejected(errors) = board.submit(&name, &content).await? {
                report_field_errors(&errors);
            }
            print_fragment(&list);
        }
        Command::Contact {
            name,
            email,
            message,
            form,
        } => {
            let contact_form = site.contact_form(form.rules());
            let fields = ContactFields::new(
                name.unwrap_or_default(),
                email,
                message.unwrap_or_default(),
            );
            match contact_form.submit(&fields).await? {
                Submission::Accepted => println!("{}", CONTACT_SUCCESS_MESSAGE),
                Submission::Rejected(errors) => report_field_errors(&errors),
                Submission::Ignored => (),
            }
        }
        Command::Slideshow { slides, seconds } => {
            match site.carousel(TerminalSlides {
                slide_count: slides,
            }) {
                Some(_carousel) => tokio::time::sleep(Duration::from_secs(seconds)).await,
                None => clean_panic!("The carousel needs at least one slide"),
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if let Command::CreateSampleConfig { force } = args.command {
        let config_path = Path::new(CONFIG_FILE_NAME);
        if config_path.exists() && !force {
            clean_panic!(
                "`{:?}` already exists! To overwrite it, add a `--force` flag.",
                config_path
            );
        }
        let sample = serde_json::to_string_pretty(&Config::sample())
            .unwrap_or_else(|error| clean_panic!("Couldn't serialize the sample: {}", error));
        if let Err(error) = fs::write(config_path, sample) {
            clean_panic!("Couldn't write `{:?}`! Details: {}", config_path, error);
        }
        return;
    }

    let config: Config = serde_json::from_str(
        &fs::read_to_string(Path::new(CONFIG_FILE_NAME)).unwrap_or_else(|error| {
            clean_panic!(
                "Configuration file isn't accessible! Consider creating a sample configuration \
                using `blog-site create-sample-config`, and then editing it. Details: {}",
                error
            );
        }),
    )
    .unwrap_or_else(|error| {
        clean_panic!(
            "Configuration file is poorly formatted!
            Fix it and try to run the program again. Details: {}",
            error
        );
    });
    set_global_log_level(&config.log_level);

    let storage = JsonFileStorage::open(&config.storage_path).unwrap_or_else(|error| {
        clean_panic!("Storage file isn't accessible! Details: {}", error);
    });
    info!("Using the storage at `{:?}`", storage.path());
    let mut site = Site::new(config, Arc::new(Mutex::new(storage)));

    if let Err(error) = run(args.command, &mut site).await {
        clean_panic!("{}", error);
    }
}
