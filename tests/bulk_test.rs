#[cfg(test)]
mod tests {
    use notify_url::{is_exclusive_match, parse_emails, parse_list, parse_phone_no, parse_urls, Entry};

    #[test]
    fn test_urls_with_commas_in_arguments() {
        let urls = [
            "mailgun://noreply@sandbox.mailgun.org/apikey/?to=test@example.com,test2@example.com,, abcd@example.com",
            "mailgun://noreply@sandbox.another.mailgun.org/apikey/?to=hello@example.com,,hmmm@example.com,, abcd@example.com, ,",
            "windows://",
        ];

        let results = parse_urls(urls.join(", "), true);
        assert_eq!(
            results,
            vec![
                "mailgun://noreply@sandbox.mailgun.org/apikey/?to=test@example.com,test2@example.com,, abcd@example.com",
                "mailgun://noreply@sandbox.another.mailgun.org/apikey/?to=hello@example.com,,hmmm@example.com,, abcd@example.com",
                "windows://",
            ]
        );
    }

    #[test]
    fn test_trailing_comma_kept_on_last_url() {
        let url = "http://hostname?password=,abcd,";
        assert_eq!(parse_urls(url, true), vec![url]);

        let urls = ["schema1://hostname?password=,abcd,", "schema2://hostname?password=,abcd,"];
        assert_eq!(
            parse_urls(urls.join(", "), true),
            vec!["schema1://hostname?password=,abcd", "schema2://hostname?password=,abcd,"]
        );

        // Passed as a list, each entry is scanned on its own
        assert_eq!(parse_urls(urls, true), urls.to_vec());
    }

    #[test]
    fn test_emails_with_display_names() {
        let emails = [
            "user1@example.com,",
            "test1@example.com,,, abcd@example.com",
            "Chuck Norris roundhouse@kick.com",
            "David Spade dspade@example.com, Yours Truly yours@truly.com",
        ];
        assert_eq!(
            parse_emails(emails.join(", "), true),
            vec![
                "user1@example.com",
                "test1@example.com",
                "abcd@example.com",
                "Chuck Norris roundhouse@kick.com",
                "David Spade dspade@example.com",
                "Yours Truly yours@truly.com",
            ]
        );
    }

    #[test]
    fn test_emails_in_brackets() {
        let emails = [
            "User1 user1@example.com",
            "User 2 user2@example.com",
            "User Three <user3@example.com>",
            "The Forth User: <user4@example.com>",
            "5th User: user4@example.com",
        ];
        assert_eq!(parse_emails(emails.join(", "), true), emails.to_vec());
        assert_eq!(parse_emails(emails, true), emails.to_vec());
    }

    #[test]
    fn test_phone_numbers() {
        assert_eq!(parse_phone_no("+1 (124) 245 2345", true), vec!["+1 (124) 245 2345"]);
        assert_eq!(parse_phone_no("911", false), vec!["911"]);
        assert_eq!(
            parse_phone_no("911, 123-123-1234", false),
            vec!["911", "123-123-1234"]
        );
        for value in ["+", "(", "0", "12"] {
            assert!(parse_phone_no(value, false).is_empty(), "{value:?}");
        }
    }

    #[test]
    fn test_parse_list_merges_inputs() {
        let results = parse_list(vec![
            Entry::from(vec![".divx", ".iso", ".mkv", ".mov", "", "  ", ".avi", ".mpeg", ".vob", ".xvid", ".mp4"]),
            Entry::from(".mov,.wmv,.mp4,.mpg"),
        ]);
        assert_eq!(
            results,
            vec![".avi", ".divx", ".iso", ".mkv", ".mov", ".mp4", ".mpeg", ".mpg", ".vob", ".wmv", ".xvid"]
        );
    }

    #[test]
    fn test_tag_filtering() {
        let tags = ["production", "email"];

        assert!(is_exclusive_match("production", tags));
        assert!(is_exclusive_match("staging, email", tags));
        assert!(is_exclusive_match(vec!["production, email"], tags));
        assert!(!is_exclusive_match(vec!["production, sms"], tags));
        assert!(is_exclusive_match("all", tags));
        assert!(!is_exclusive_match(Entry::Seq(vec![]), tags));
        assert!(is_exclusive_match(Entry::Seq(vec![]), Entry::from(None::<&str>)));
    }
}
