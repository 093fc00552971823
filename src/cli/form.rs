use clap::Args;
use folio_shared::contact::FormFields;

/// Contact form values; omitted flags are submitted as empty strings.
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub subject: String,

    #[arg(long, default_value = "")]
    pub message: String,
}

impl From<FormArgs> for FormFields {
    fn from(args: FormArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            subject: args.subject,
            message: args.message,
        }
    }
}
