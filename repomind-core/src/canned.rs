//! Statically authored content: status lines, sample questions and the three
//! canned chat replies.

use rand::Rng;

use crate::types::{Citation, CodeBlock, Message, MessageId, Role};

/// Opening system message of every chat session.
pub const GREETING: &str =
    "I've analyzed the repository. What would you like to know about the codebase?";

/// Pool the processing terminal log draws from.
pub const STATUS_MESSAGES: [&str; 10] = [
    "Cloning repository...",
    "Analyzing file structure...",
    "Processing JavaScript files...",
    "Processing TypeScript files...",
    "Processing CSS and styling...",
    "Analyzing dependencies...",
    "Generating code embeddings...",
    "Building semantic index...",
    "Analyzing code relationships...",
    "Finalizing knowledge graph...",
];

/// Questions rotated on the landing screen.
pub const SAMPLE_QUESTIONS: [&str; 6] = [
    "How does the authentication flow work?",
    "What are the main components in this architecture?",
    "Explain the database schema and relationships",
    "How is state management implemented?",
    "What testing frameworks are used and how?",
    "Explain the API endpoints and their functionality",
];

/// A reply template. Turned into a [`Message`] when picked.
#[derive(Debug)]
pub struct CannedReply {
    pub content: &'static str,
    /// `(file, lines)` pairs.
    pub citations: &'static [(&'static str, &'static str)],
    /// `(language, code)` pairs.
    pub code_blocks: &'static [(&'static str, &'static str)],
}

impl CannedReply {
    pub fn to_message(&self, id: MessageId) -> Message {
        Message {
            id,
            role: Role::System,
            content: self.content.to_owned(),
            citations: self
                .citations
                .iter()
                .map(|(file, lines)| Citation {
                    file: (*file).to_owned(),
                    lines: (*lines).to_owned(),
                })
                .collect(),
            code_blocks: self
                .code_blocks
                .iter()
                .map(|(language, code)| CodeBlock {
                    language: (*language).to_owned(),
                    code: (*code).to_owned(),
                })
                .collect(),
        }
    }
}

/// Picks one reply uniformly at random.
pub fn pick_reply<R: Rng + ?Sized>(rng: &mut R) -> &'static CannedReply {
    &REPLIES[rng.gen_range(0..REPLIES.len())]
}

/// Picks one status line uniformly at random.
pub fn pick_status<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    STATUS_MESSAGES[rng.gen_range(0..STATUS_MESSAGES.len())]
}

/// The three reply templates, in no particular order.
pub static REPLIES: [CannedReply; 3] = [
    CannedReply {
        content: "The authentication flow in this application uses NextAuth.js for handling user \
                  sessions. The flow starts in `pages/api/auth/[...nextauth].js` where providers \
                  are configured. When a user logs in, the credentials are validated against the \
                  database, and if successful, a JWT token is generated and stored in cookies.",
        citations: &[
            ("pages/api/auth/[...nextauth].js", "12-45"),
            ("utils/auth.ts", "23-56"),
        ],
        code_blocks: &[("typescript", AUTH_SNIPPET)],
    },
    CannedReply {
        content: "The main components in this architecture are organized in a typical Next.js \
                  project structure. The application follows a component-based architecture with \
                  reusable UI components in the `components` directory, page components in the \
                  `pages` directory, and utility functions in the `utils` directory.",
        citations: &[
            ("components/Button.tsx", "1-25"),
            ("pages/index.tsx", "1-42"),
        ],
        code_blocks: &[],
    },
    CannedReply {
        content: "The database schema uses MongoDB with the following collections:\n\n\
                  1. **Users**: Stores user information including email, hashed password, and \
                  profile data.\n\
                  2. **Posts**: Contains blog posts with title, content, author reference, and \
                  timestamps.\n\
                  3. **Comments**: Stores comments related to posts with content, author \
                  reference, and timestamps.",
        citations: &[("utils/db.ts", "10-35")],
        code_blocks: &[("typescript", DB_SNIPPET)],
    },
];

const AUTH_SNIPPET: &str = r#"// pages/api/auth/[...nextauth].js
import NextAuth from 'next-auth';
import Providers from 'next-auth/providers';
import { verifyPassword } from '../../../utils/auth';
import { connectToDatabase } from '../../../utils/db';

export default NextAuth({
  session: {
    jwt: true,
  },
  providers: [
    Providers.Credentials({
      async authorize(credentials) {
        const client = await connectToDatabase();
        const usersCollection = client.db().collection('users');
        const user = await usersCollection.findOne({ email: credentials.email });

        if (!user) {
          throw new Error('No user found!');
        }

        const isValid = await verifyPassword(
          credentials.password,
          user.password
        );

        if (!isValid) {
          throw new Error('Could not log you in!');
        }

        return { email: user.email };
      },
    }),
  ],
});"#;

const DB_SNIPPET: &str = r#"// utils/db.ts
import { MongoClient } from 'mongodb';

const MONGODB_URI = process.env.MONGODB_URI;
const MONGODB_DB = process.env.MONGODB_DB;

if (!MONGODB_URI) {
  throw new Error('Please define the MONGODB_URI environment variable');
}

if (!MONGODB_DB) {
  throw new Error('Please define the MONGODB_DB environment variable');
}

let cachedClient = null;
let cachedDb = null;

export async function connectToDatabase() {
  if (cachedClient && cachedDb) {
    return { client: cachedClient, db: cachedDb };
  }

  const client = await MongoClient.connect(MONGODB_URI, {
    useNewUrlParser: true,
    useUnifiedTopology: true,
  });

  const db = client.db(MONGODB_DB);

  cachedClient = client;
  cachedDb = db;

  return { client, db };
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_reply_is_reachable() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let picked = pick_reply(&mut rng);
            let idx = REPLIES
                .iter()
                .position(|r| std::ptr::eq(r, picked))
                .unwrap();
            seen[idx] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn reply_message_carries_attachments() {
        let msg = REPLIES[0].to_message(MessageId(9));
        assert_eq!(msg.role, Role::System);
        assert_eq!(msg.citations.len(), 2);
        assert_eq!(msg.citations[1].file, "utils/auth.ts");
        assert_eq!(msg.code_blocks[0].language, "typescript");
        assert!(msg.code_blocks[0].code.starts_with("// pages/api/auth"));

        let plain = REPLIES[1].to_message(MessageId(10));
        assert!(plain.code_blocks.is_empty());
    }

    #[test]
    fn schema_reply_keeps_its_line_breaks() {
        let msg = REPLIES[2].to_message(MessageId(1));
        let lines: Vec<_> = msg.content.split('\n').collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("1. **Users**"));
    }

    #[test]
    fn status_lines_come_from_the_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(STATUS_MESSAGES.contains(&pick_status(&mut rng)));
        }
    }
}
