//! Line-oriented front-end for [`UserListView`].

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::client::UsersApi;
use crate::view::UserListView;

const REFRESH: &str = "/refresh";
const QUIT: &str = "/quit";

/// What a single input line asks the view to do.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Refresh,
    Quit,
    Add(&'a str),
}

fn parse(line: &str) -> Command<'_> {
    match line.trim_end_matches(['\r', '\n']) {
        REFRESH => Command::Refresh,
        QUIT => Command::Quit,
        name => Command::Add(name),
    }
}

/// Draw the loading state, then fetch.
async fn refresh<A, W>(view: &mut UserListView<A>, output: &mut W) -> std::io::Result<()>
where
    A: UsersApi,
    W: AsyncWrite + Unpin,
{
    view.start_loading();
    output.write_all(view.render().as_bytes()).await?;
    output.flush().await?;
    view.load().await;
    Ok(())
}

/// Mount the view, then treat each line as typing into the input and
/// pressing "Add User". The view is redrawn after every action.
pub async fn run<A, R, W>(view: &mut UserListView<A>, input: R, mut output: W) -> std::io::Result<()>
where
    A: UsersApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    refresh(view, &mut output).await?;
    output.write_all(view.render().as_bytes()).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse(&line) {
            Command::Quit => break,
            Command::Refresh => refresh(view, &mut output).await?,
            Command::Add(name) => {
                view.set_name(name);
                view.submit().await;
            }
        }
        output.write_all(view.render().as_bytes()).await?;
        output.flush().await?;
    }
    Ok(())
}
