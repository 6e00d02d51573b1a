use std::ffi::OsString;

pub use clap::Parser;

use crate::shop::models::PAYMENT_METHODS;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// API base URL. Overrides SHOPLINE_API_URL.
    #[clap(long, value_name = "URL", help = "API base URL")]
    api_url: Option<String>,

    /// CDN base URL for product images. Overrides SHOPLINE_CDN_URL.
    #[clap(long, value_name = "URL", help = "CDN base URL")]
    cdn_url: Option<String>,

    /// Product ids to put into the basket, in order. May be repeated.
    #[clap(short = 'a', long = "add", value_name = "ID", help = "add product to basket")]
    add: Vec<String>,

    #[clap(long, value_name = "ID", help = "show product details")]
    preview: Option<String>,

    #[clap(long, value_parser = PAYMENT_METHODS, help = "payment method")]
    payment: Option<String>,

    #[clap(long, help = "delivery address")]
    address: Option<String>,

    #[clap(long, help = "contact email")]
    email: Option<String>,

    #[clap(long, help = "contact phone")]
    phone: Option<String>,

    /// Submit the order once both checkout steps are filled in
    #[clap(long, help = "submit the order")]
    submit: bool,

    #[clap(short = 'v', long, help = "verbose logging")]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    api_url: Option<String>,
    cdn_url: Option<String>,
    add: Vec<String>,
    preview: Option<String>,
    payment: Option<String>,
    address: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    submit: bool,
    verbose: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            api_url: args.api_url,
            cdn_url: args.cdn_url,
            add: args.add,
            preview: args.preview,
            payment: args.payment,
            address: args.address,
            email: args.email,
            phone: args.phone,
            submit: args.submit,
            verbose: args.verbose,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn cdn_url(&self) -> Option<&str> {
        self.cdn_url.as_deref()
    }

    pub fn add(&self) -> &[String] {
        &self.add
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn payment(&self) -> Option<&str> {
        self.payment.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn submit(&self) -> bool {
        self.submit
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
