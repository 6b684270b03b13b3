/*!

This is the long-form manual for `candidate_match` and `voterguide match`.

## Scoring

Every option of every quiz question carries an alignment label (`progressive`,
`moderate`, `conservative`, or any other label). Every candidate carries exactly one
label. For a given answer sheet, the match of a candidate is:

```text
matching answers / answered questions * 100
```

rounded to the nearest integer (0.5 is rounded up). A question answered several times
only counts once, with its last answer. Candidates are sorted from the best match to
the worst one. Candidates with the same percentage keep the order in which they appear
in the configuration. When no question is answered, all the candidates are at 0%.

Labels are compared after trimming and lower-casing. Unknown labels are not an error:
`Libertarian` on an option matches a candidate labelled `libertarian`.

## Input formats

### `csv`

One answer per row. The first row is a header and is skipped.

```text
questionId,optionId
q1,a
q2,c
q1,b
```

Rows are read in order: here `q1` is answered with `b`.

### `json`

An array of answers.

```text
[
  {"questionId": "q1", "optionId": "a"},
  {"questionId": "q2", "optionId": "c"}
]
```

In both formats, the alignment is looked up from the option in the configuration file.
An answer that points to an unknown question or option is rejected.

## Configuration

```text
{
  "outputSettings": {"contestName": "City council 2026"},
  "questions": [
    {"id": "q1", "text": "Public transport should be free.",
     "options": [
       {"id": "a", "text": "Agree", "alignment": "progressive"},
       {"id": "b", "text": "Neutral", "alignment": "moderate"},
       {"id": "c", "text": "Disagree", "alignment": "conservative"}]}
  ],
  "candidates": [
    {"name": "Alice", "party": "Green", "alignment": "progressive"}
  ],
  "answerSources": [
    {"provider": "csv", "filePath": "answers.csv"}
  ]
}
```

`filePath` is relative to the directory of the configuration file. The `--input` flag
replaces the answer sources of the configuration.

 */
