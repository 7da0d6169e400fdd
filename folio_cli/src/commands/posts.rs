use anyhow::Result;
use clap::{Args, Subcommand};
use folio_lib::types::PostInput;
use folio_lib::{validation, AdminClient};

use crate::output::{print_json, print_posts, OutputFormat};

#[derive(Args)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsAction,
}

#[derive(Subcommand)]
pub enum PostsAction {
    /// List blog posts
    List {
        /// Only drafts
        #[arg(long)]
        drafts: bool,
    },
    /// Create a post from the command line
    Create {
        #[arg(long)]
        title: String,

        /// URL slug. Derived from the title when omitted
        #[arg(long)]
        slug: Option<String>,

        /// Short summary shown in listings
        #[arg(long)]
        excerpt: Option<String>,

        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Publish immediately instead of saving a draft
        #[arg(long)]
        publish: bool,
    },
    /// Publish a post
    Publish {
        id: String,

        /// Move the post back to drafts instead
        #[arg(long)]
        unpublish: bool,
    },
    /// Delete a post
    Delete { id: String },
}

pub async fn run(args: &PostsArgs, client: &AdminClient, format: &OutputFormat) -> Result<()> {
    match &args.action {
        PostsAction::List { drafts } => {
            let mut posts = client.list_posts().await?;
            if *drafts {
                posts.retain(|p| !p.published);
            }
            print_posts(&posts, format);
        }
        PostsAction::Create {
            title,
            slug,
            excerpt,
            tags,
            publish,
        } => {
            let title = validation::validate_title(title)?;
            let slug = match slug {
                Some(slug) => validation::validate_slug(slug)?,
                None => validation::validate_slug(&validation::slugify(&title))?,
            };
            let tags = tags
                .iter()
                .map(|t| validation::validate_slug(&validation::slugify(t)))
                .collect::<Result<Vec<_>, _>>()?;
            let input = PostInput {
                title: Some(title),
                slug: Some(slug),
                excerpt: excerpt
                    .as_deref()
                    .map(|e| validation::sanitize_text(e, 500))
                    .transpose()?,
                published: Some(*publish),
                tags: (!tags.is_empty()).then_some(tags),
                ..PostInput::default()
            };
            let post = client.create_post(&input).await?;
            print_posts(&[post], format);
        }
        PostsAction::Publish { id, unpublish } => {
            let post = client.publish_post(id, !*unpublish).await?;
            print_posts(&[post], format);
        }
        PostsAction::Delete { id } => {
            let ack = client.delete_post(id).await?;
            print_json(&ack);
        }
    }
    Ok(())
}
